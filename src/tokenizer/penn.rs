//! Token-granularity segmentation following Penn Treebank conventions.
//!
//! The input window is scanned left to right. Whitespace separates chunks;
//! inside a chunk, [`CASCADE`] is consulted at every position and the first
//! rule that matches decides the next one or more pieces.

use super::tables::RuleTables;
use crate::span::{Span, Token};

/// One output token inside a chunk, measured in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Piece {
    len: usize,
    form: Option<&'static str>,
}

impl Piece {
    fn plain(len: usize) -> Self {
        Piece { len, form: None }
    }

    fn quote(len: usize, form: &'static str) -> Self {
        Piece {
            len,
            form: Some(form),
        }
    }
}

type Rule = fn(&Chunk<'_>, &RuleTables, usize) -> Option<Vec<Piece>>;

/// Rules in priority order. The first `Some` wins.
pub(crate) const CASCADE: &[(&str, Rule)] = &[
    ("quote", quote),
    ("apostrophe", apostrophe),
    ("dots_and_dashes", dots_and_dashes),
    ("currency", currency),
    ("number", number),
    ("abbreviation", abbreviation),
    ("word", word),
];

pub(crate) fn tokenize(tables: &RuleTables, text: &str, span: Span, out: &mut Vec<Token>) {
    let Some(window) = span.get(text) else {
        return;
    };
    let chars: Vec<(usize, char)> = window
        .char_indices()
        .map(|(idx, c)| (span.begin + idx, c))
        .collect();

    let mut i = 0;
    while i < chars.len() {
        if chars[i].1.is_whitespace() {
            i += 1;
            continue;
        }
        let end = chars[i..]
            .iter()
            .position(|(_, c)| c.is_whitespace())
            .map_or(chars.len(), |n| i + n);
        let letters: Vec<char> = chars[i..end].iter().map(|&(_, c)| c).collect();
        let chunk = Chunk {
            chars: &letters,
            last: chars[end..].iter().all(|(_, c)| c.is_whitespace()),
        };

        let mut p = i;
        for piece in chunk.pieces(tables) {
            let begin = chars[p].0;
            p += piece.len;
            let stop = chars.get(p).map_or(span.end, |&(offset, _)| offset);
            if stop > begin {
                let token = Token::new(Span::new(begin, stop));
                out.push(match piece.form {
                    Some(form) => token.with_form(form),
                    None => token,
                });
            }
        }
        i = end;
    }
}

/// A maximal run of non-whitespace characters.
pub(crate) struct Chunk<'c> {
    chars: &'c [char],
    /// Nothing but whitespace follows this chunk inside the window.
    last: bool,
}

impl<'c> Chunk<'c> {
    fn pieces(&self, tables: &RuleTables) -> Vec<Piece> {
        let mut pieces = Vec::new();
        let mut p = 0;
        while p < self.len() {
            let step = CASCADE
                .iter()
                .find_map(|(_, rule)| rule(self, tables, p))
                .unwrap_or_else(|| vec![Piece::plain(1)]);
            for piece in step {
                // Rules never overrun the chunk, but a zero-length piece
                // would stall the scan.
                let len = piece.len.clamp(1, self.len() - p);
                pieces.push(Piece { len, ..piece });
                p += len;
                if p >= self.len() {
                    break;
                }
            }
        }
        pieces
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    fn at(&self, k: usize) -> Option<char> {
        self.chars.get(k).copied()
    }

    fn alpha_at(&self, k: usize) -> bool {
        self.at(k).map_or(false, char::is_alphabetic)
    }

    fn alnum_at(&self, k: usize) -> bool {
        self.at(k).map_or(false, char::is_alphanumeric)
    }

    fn digit_at(&self, k: usize) -> bool {
        self.at(k).map_or(false, |c| c.is_ascii_digit())
    }

    fn run_while(&self, k: usize, pred: impl Fn(char) -> bool) -> usize {
        self.chars[k.min(self.len())..]
            .iter()
            .take_while(|&&c| pred(c))
            .count()
    }

    fn run_of(&self, k: usize, c: char) -> usize {
        self.run_while(k, |x| x == c)
    }

    fn alpha_run(&self, k: usize) -> usize {
        self.run_while(k, char::is_alphabetic)
    }

    fn alnum_run(&self, k: usize) -> usize {
        self.run_while(k, char::is_alphanumeric)
    }

    fn digit_run(&self, k: usize) -> usize {
        self.run_while(k, |c| c.is_ascii_digit())
    }

    fn slice(&self, from: usize, to: usize) -> String {
        self.chars[from..to].iter().collect()
    }

    fn matches(&self, k: usize, needle: &str) -> bool {
        needle
            .chars()
            .enumerate()
            .all(|(n, c)| self.at(k + n) == Some(c))
    }

    fn at_word_start(&self, k: usize) -> bool {
        k == 0 || !self.chars[k - 1].is_alphanumeric()
    }

    /// Whether a quote glyph at `k` opens a quoted region.
    fn opens(&self, k: usize) -> bool {
        k == 0
            || matches!(
                self.chars[k - 1],
                '(' | '[' | '{' | '<' | '-' | '`' | '\u{201C}' | '\u{2018}'
            )
    }

    /// End of an alphanumeric run starting at `k`, extended across
    /// single internal hyphens.
    fn compound_end(&self, k: usize) -> usize {
        let mut end = k + self.alnum_run(k);
        while self.at(end) == Some('-') && self.alnum_at(end + 1) {
            end += 1 + self.alnum_run(end + 1);
        }
        end
    }
}

fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '\u{2018}' | '\u{2019}')
}

fn pieces_of(lengths: &[usize]) -> Vec<Piece> {
    lengths.iter().map(|&len| Piece::plain(len)).collect()
}

/// Double quotes, backtick runs and runs of two or more apostrophes.
fn quote(chunk: &Chunk<'_>, _: &RuleTables, p: usize) -> Option<Vec<Piece>> {
    let piece = match chunk.at(p)? {
        '`' if chunk.run_of(p, '`') >= 2 => Piece::quote(2, "``"),
        '`' => Piece::quote(1, "`"),
        // `'''` closes a single quote first, then the double quote
        '\'' if chunk.run_of(p, '\'') >= 2 => {
            if chunk.run_of(p, '\'') % 2 == 1 {
                Piece::quote(1, "'")
            } else {
                Piece::quote(2, "''")
            }
        }
        '"' if chunk.opens(p) => Piece::quote(1, "``"),
        '"' => Piece::quote(1, "''"),
        '\u{201C}' => Piece::quote(1, "``"),
        '\u{201D}' => Piece::quote(1, "''"),
        _ => return None,
    };
    Some(vec![piece])
}

/// A lone apostrophe: decade forms (`'80`), leading irregular forms
/// (`'tis`), a contraction suffix standing on its own (`'em`, or `'s`
/// after an abbreviation as in `U.S.'s`), otherwise a single quote token.
fn apostrophe(chunk: &Chunk<'_>, tables: &RuleTables, p: usize) -> Option<Vec<Piece>> {
    if !is_apostrophe(chunk.at(p)?) {
        return None;
    }
    let opens = chunk.opens(p);
    if opens && chunk.digit_at(p + 1) {
        return Some(vec![Piece::plain(1 + chunk.alnum_run(p + 1))]);
    }
    let letters = chunk.alpha_run(p + 1);
    if letters > 0 && !chunk.alnum_at(p + 1 + letters) {
        let clitic = chunk.slice(p, p + 1 + letters);
        if opens {
            if let Some(lengths) = tables.irregular_split(&clitic) {
                return Some(pieces_of(lengths));
            }
        }
        let after_period = p > 0 && chunk.at(p - 1) == Some('.');
        if (opens || after_period) && tables.is_suffix(&clitic) {
            return Some(vec![Piece::plain(1 + letters)]);
        }
    }
    Some(vec![Piece::quote(1, if opens { "`" } else { "'" })])
}

/// Ellipses of three or more periods and dash runs stay joined.
fn dots_and_dashes(chunk: &Chunk<'_>, _: &RuleTables, p: usize) -> Option<Vec<Piece>> {
    let len = match chunk.at(p)? {
        '.' => match chunk.run_of(p, '.') {
            run if run >= 3 => run,
            _ => 1,
        },
        '-' => chunk.run_of(p, '-'),
        _ => return None,
    };
    Some(vec![Piece::plain(len)])
}

/// A currency symbol directly followed by a digit is its own token.
fn currency(chunk: &Chunk<'_>, tables: &RuleTables, p: usize) -> Option<Vec<Piece>> {
    let word_start = chunk.at_word_start(p);
    tables.currency_symbols().find_map(|symbol| {
        let len = symbol.chars().count();
        let letter_led = symbol.chars().next().map_or(false, char::is_alphabetic);
        if chunk.matches(p, symbol) && chunk.digit_at(p + len) && (word_start || !letter_led) {
            Some(vec![Piece::plain(len)])
        } else {
            None
        }
    })
}

/// Digit runs with thousands/decimal separators and at most one colon.
///
/// Plain digit runs running into letters or an apostrophe are left to the
/// word rule (`1990s`, `1990's`), except for a meridiem (`4pm`).
fn number(chunk: &Chunk<'_>, tables: &RuleTables, p: usize) -> Option<Vec<Piece>> {
    if !chunk.digit_at(p) {
        return None;
    }
    let mut k = p + chunk.digit_run(p);
    let mut separated = false;
    let mut colon = false;
    loop {
        match chunk.at(k) {
            Some(',') | Some('.') if chunk.digit_at(k + 1) => separated = true,
            Some(':') if !colon && chunk.digit_at(k + 1) => colon = true,
            _ => break,
        }
        k += 1 + chunk.digit_run(k + 1);
    }

    let len = match chunk.at(k) {
        // 37%-owned
        Some('%') if chunk.at(k + 1) == Some('-') && chunk.alnum_at(k + 2) => {
            chunk.compound_end(k + 2) - p
        }
        Some('-') if chunk.alnum_at(k + 1) => chunk.compound_end(k + 1) - p,
        Some(c) if c.is_alphabetic() => {
            let letters = chunk.alpha_run(k);
            let meridiem = !chunk.alnum_at(k + letters)
                && tables.is_meridiem(&chunk.slice(k, k + letters));
            if meridiem || separated || colon {
                k - p
            } else {
                return None;
            }
        }
        Some(c) if is_apostrophe(c) && chunk.alpha_at(k + 1) && !(separated || colon) => {
            return None;
        }
        _ => k - p,
    };
    Some(vec![Piece::plain(len)])
}

/// Periods that belong to an abbreviation: letter-period groups (`U.S.`),
/// entries of the abbreviation table (`Corp.`), and a capital initial that
/// is not the last chunk of the window.
///
/// A sentence-final period directly after an abbreviation's own period
/// (`U.S..`) is not absorbed and comes out as a separate token.
fn abbreviation(chunk: &Chunk<'_>, tables: &RuleTables, p: usize) -> Option<Vec<Piece>> {
    let first = chunk.at(p)?;
    if !first.is_alphabetic() || !chunk.at_word_start(p) {
        return None;
    }

    let mut k = p;
    let mut groups = 0;
    while chunk.alpha_at(k) && chunk.at(k + 1) == Some('.') {
        groups += 1;
        k += 2;
    }
    if groups >= 2 && !chunk.alnum_at(k) {
        return Some(vec![Piece::plain(k - p)]);
    }

    // table entries, longest first; a key may span several periods (`Ph.D.`)
    let mut ends = Vec::new();
    let mut k = p;
    loop {
        let letters = chunk.alpha_run(k);
        if letters == 0 || chunk.at(k + letters) != Some('.') {
            break;
        }
        k += letters + 1;
        ends.push(k);
    }
    if let Some(&end) = ends
        .iter()
        .rev()
        .find(|&&end| tables.is_abbreviation(&chunk.slice(p, end - 1)))
    {
        return Some(vec![Piece::plain(end - p)]);
    }

    let letters = chunk.alpha_run(p);
    if chunk.at(p + letters) != Some('.') {
        return None;
    }
    if letters == 1 && first.is_uppercase() && p + 2 == chunk.len() && !chunk.last {
        return Some(vec![Piece::plain(2)]);
    }
    None
}

/// Maximal alphanumeric run, joined across internal apostrophes, hyphens
/// and ampersands, then split by the contraction tables.
fn word(chunk: &Chunk<'_>, tables: &RuleTables, p: usize) -> Option<Vec<Piece>> {
    if !chunk.alnum_at(p) {
        return None;
    }
    let mut k = p + chunk.alnum_run(p);
    loop {
        match chunk.at(k) {
            Some(c) if is_apostrophe(c) && chunk.alpha_at(k + 1) => {}
            Some('-') | Some('&') if chunk.alnum_at(k + 1) => {}
            _ => break,
        }
        k += 1 + chunk.alnum_run(k + 1);
    }

    let word = chunk.slice(p, k);
    let len = k - p;
    if let Some(lengths) = tables.irregular_split(&word) {
        return Some(pieces_of(lengths));
    }
    if let Some(suffix) = tables.suffix_len(&word) {
        return Some(vec![Piece::plain(len - suffix), Piece::plain(suffix)]);
    }
    Some(vec![Piece::plain(len)])
}
