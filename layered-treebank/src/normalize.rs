//! Glyph folding shared by both sides of an alignment.
//!
//! Treebank leaves and raw text disagree on how quotes and brackets are
//! written: the treebank has ``` `` ```, `''` and `-LRB-` where the raw text
//! has `"`, `“`, `’` or `(`. Both sides are read as sequences of canonical
//! units so that these variants compare equal.

use crate::escape::bracket_escape_at;
use std::collections::HashSet;

pub(crate) const DOUBLE_QUOTE: char = '"';
pub(crate) const SINGLE_QUOTE: char = '\'';

/// Fold one character to its canonical unit.
pub fn fold(c: char) -> char {
    match c {
        '"' | '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{00AB}' | '\u{00BB}' => DOUBLE_QUOTE,
        '\'' | '`' | '\u{2018}' | '\u{2019}' | '\u{201A}' => SINGLE_QUOTE,
        c => c,
    }
}

/// Canonical units of a leaf's text.
pub fn canonical_units(text: &str) -> Vec<char> {
    let mut units = Vec::with_capacity(text.len());
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        let (unit, len) = readings(rest)[0];
        debug_assert!(len >= c.len_utf8());
        units.push(unit);
        rest = &rest[len..];
    }
    units
}

/// The normalized form of `text` as a string.
pub fn normalize(text: &str) -> String {
    canonical_units(text).into_iter().collect()
}

/// How strictly units are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct MatchMode {
    /// Single and double quotes compare equal.
    pub quotes_interchangeable: bool,
    /// A raw hyphen (and any line break after it) may be skipped inside a
    /// leaf.
    pub skip_raw_hyphens: bool,
}

impl MatchMode {
    pub const EXACT: MatchMode = MatchMode {
        quotes_interchangeable: false,
        skip_raw_hyphens: false,
    };

    fn equivalent(self, raw: char, leaf: char) -> bool {
        raw == leaf
            || (self.quotes_interchangeable && is_quote_unit(raw) && is_quote_unit(leaf))
    }
}

pub(crate) fn is_quote_unit(unit: char) -> bool {
    unit == DOUBLE_QUOTE || unit == SINGLE_QUOTE
}

/// Match `units` against `text` starting at byte offset `start`. Returns the
/// end offset of the match.
///
/// A raw `''` reads as one double quote or as two single quotes, so the
/// search branches; failed `(offset, unit)` states are remembered, which
/// keeps the work within `units × offsets`.
pub(crate) fn match_at(text: &str, start: usize, units: &[char], mode: MatchMode) -> Option<usize> {
    Matcher {
        text,
        start,
        units,
        mode,
        failed: HashSet::new(),
    }
    .match_from(start, 0)
}

struct Matcher<'m> {
    text: &'m str,
    start: usize,
    units: &'m [char],
    mode: MatchMode,
    failed: HashSet<(usize, usize)>,
}

impl<'m> Matcher<'m> {
    fn match_from(&mut self, pos: usize, unit: usize) -> Option<usize> {
        let Some(&expected) = self.units.get(unit) else {
            return Some(pos);
        };
        if self.failed.contains(&(pos, unit)) {
            return None;
        }
        let text = self.text;
        let tail = text.get(pos..)?;
        for (reading, len) in readings(tail) {
            if self.mode.equivalent(reading, expected) {
                if let Some(end) = self.match_from(pos + len, unit + 1) {
                    return Some(end);
                }
            }
        }
        if self.mode.skip_raw_hyphens
            && pos > self.start
            && expected != '-'
            && tail.starts_with('-')
        {
            let after = &tail[1..];
            let skip = 1 + after.len() - after.trim_start().len();
            if let Some(end) = self.match_from(pos + skip, unit) {
                return Some(end);
            }
        }
        self.failed.insert((pos, unit));
        None
    }
}

/// Every way to read one canonical unit off the front of `raw`, longest
/// first. Empty input has no readings.
fn readings(raw: &str) -> Vec<(char, usize)> {
    let mut out = Vec::with_capacity(3);
    if raw.starts_with("``") || raw.starts_with("''") {
        out.push((DOUBLE_QUOTE, 2));
    }
    if let Some((escape, literal)) = bracket_escape_at(raw) {
        out.push((literal, escape.len()));
    }
    if let Some(c) = raw.chars().next() {
        out.push((fold(c), c.len_utf8()));
    }
    out
}
