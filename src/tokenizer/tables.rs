//! Lexical override tables for the Penn tokenizer.
//!
//! Tables are plain immutable data. The Penn defaults are built once and
//! shared; a caller wanting different behavior builds its own `RuleTables`
//! and hands it to [`Tokenizer::with_tables`](crate::Tokenizer::with_tables).

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Irregular forms, written as their surface with a space at every forced
/// split point.
const PENN_IRREGULAR: &[&str] = &[
    "can not", "ca n't", "wo n't", "wan na", "gon na", "got ta", "gim me", "lem me",
    "wha t cha", "d' ye", "more 'n", "'t is", "'t was",
];

const PENN_SUFFIXES: &[&str] = &["n't", "'ve", "'ll", "'re", "'em", "'s", "'m", "'d"];

const PENN_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "messrs", "dr", "prof", "sr", "jr", "st", "mt", "gen", "gov", "sen",
    "rep", "rev", "capt", "col", "lt", "sgt", "inc", "ltd", "corp", "co", "bros", "vs", "etc",
    "ph.d",
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];

const PENN_CURRENCY: &[&str] = &["US$", "C$", "A$", "HK$", "NZ$", "S$", "$", "£", "€", "¥", "#"];

const PENN_MERIDIEMS: &[&str] = &["am", "pm"];

pub(crate) static PENN_TABLES: Lazy<Arc<RuleTables>> = Lazy::new(|| Arc::new(RuleTables::penn()));

/// Contraction, abbreviation, currency and meridiem tables consulted by the
/// token-granularity cascade.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTables {
    /// Lowercased surface -> piece lengths in characters.
    irregular: HashMap<String, Vec<usize>>,
    /// Lowercased suffixes, longest first.
    suffixes: Vec<String>,
    /// Lowercased, without the trailing period.
    abbreviations: HashSet<String>,
    /// Longest first.
    currency: Vec<String>,
    meridiems: HashSet<String>,
}

impl RuleTables {
    /// Tables with no entries at all. Only the structural rules apply.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The Penn Treebank defaults.
    pub fn penn() -> Self {
        RuleTables::empty()
            .with_irregular(PENN_IRREGULAR)
            .with_suffixes(PENN_SUFFIXES)
            .with_abbreviations(PENN_ABBREVIATIONS)
            .with_currency(PENN_CURRENCY)
            .with_meridiems(PENN_MERIDIEMS)
    }

    /// Add irregular forms. Each entry is the surface form with a single
    /// space at every split point, e.g. `"wan na"`. Entries with fewer than
    /// two pieces are ignored.
    pub fn with_irregular<S: AsRef<str>>(mut self, entries: &[S]) -> Self {
        for entry in entries {
            let pieces: Vec<&str> = entry.as_ref().split_whitespace().collect();
            if pieces.len() < 2 {
                continue;
            }
            let key: String = pieces.iter().flat_map(|p| p.chars()).map(fold_char).collect();
            let lengths = pieces.iter().map(|p| p.chars().count()).collect();
            self.irregular.insert(key, lengths);
        }
        self
    }

    pub fn with_suffixes<S: AsRef<str>>(mut self, suffixes: &[S]) -> Self {
        for suffix in suffixes {
            let suffix: String = suffix.as_ref().chars().map(fold_char).collect();
            if !suffix.is_empty() && !self.suffixes.contains(&suffix) {
                self.suffixes.push(suffix);
            }
        }
        self.suffixes
            .sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
        self
    }

    pub fn with_abbreviations<S: AsRef<str>>(mut self, abbreviations: &[S]) -> Self {
        for abbrev in abbreviations {
            let abbrev = abbrev.as_ref().trim_end_matches('.');
            if !abbrev.is_empty() {
                self.abbreviations.insert(abbrev.chars().map(fold_char).collect());
            }
        }
        self
    }

    pub fn with_currency<S: AsRef<str>>(mut self, symbols: &[S]) -> Self {
        for symbol in symbols {
            let symbol = symbol.as_ref().to_string();
            if !symbol.is_empty() && !self.currency.contains(&symbol) {
                self.currency.push(symbol);
            }
        }
        self.currency
            .sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
        self
    }

    pub fn with_meridiems<S: AsRef<str>>(mut self, meridiems: &[S]) -> Self {
        for meridiem in meridiems {
            self.meridiems
                .insert(meridiem.as_ref().chars().map(fold_char).collect());
        }
        self
    }

    /// Piece lengths for an exact irregular match on `word`.
    pub fn irregular_split(&self, word: &str) -> Option<&[usize]> {
        let key: String = word.chars().map(fold_char).collect();
        self.irregular.get(&key).map(Vec::as_slice)
    }

    /// Character length of the longest contraction suffix ending `word`,
    /// provided something is left in front of it.
    pub fn suffix_len(&self, word: &str) -> Option<usize> {
        let folded: String = word.chars().map(fold_char).collect();
        let word_len = folded.chars().count();
        self.suffixes
            .iter()
            .map(|suffix| (suffix, suffix.chars().count()))
            .find(|(suffix, len)| *len < word_len && folded.ends_with(suffix.as_str()))
            .map(|(_, len)| len)
    }

    /// Whether `piece` is exactly one of the contraction suffixes.
    pub fn is_suffix(&self, piece: &str) -> bool {
        let key: String = piece.chars().map(fold_char).collect();
        self.suffixes.iter().any(|suffix| *suffix == key)
    }

    /// Keys may contain internal periods (`ph.d`); the final period is
    /// never part of the key.
    pub fn is_abbreviation(&self, word: &str) -> bool {
        let key: String = word.chars().map(fold_char).collect();
        self.abbreviations.contains(&key)
    }

    pub fn is_meridiem(&self, word: &str) -> bool {
        let key: String = word.chars().map(fold_char).collect();
        self.meridiems.contains(&key)
    }

    /// Currency symbols, longest first.
    pub fn currency_symbols(&self) -> impl Iterator<Item = &str> {
        self.currency.iter().map(String::as_str)
    }
}

/// ASCII lowercase with the typographic apostrophe folded to `'`.
///
/// Keeps one output character per input character so piece lengths computed
/// on folded text apply to the unfolded text.
pub(crate) fn fold_char(c: char) -> char {
    match c {
        '\u{2019}' => '\'',
        c => c.to_ascii_lowercase(),
    }
}
