//! Rule-based segmentation of raw text spans into token spans.
//!
//! Two granularities are available and chosen per call:
//!
//! - [`Granularity::Token`] runs the Penn Treebank cascade: quote
//!   normalization, punctuation runs, contraction splitting, currency and
//!   number handling, abbreviation protection and time literals.
//! - [`Granularity::Subtoken`] splits at every character-class boundary and
//!   ignores the lexical tables.
//!
//! Output spans are strictly increasing, non-overlapping, never empty and
//! always inside the input span.

mod penn;
mod subtoken;
mod tables;

pub use tables::RuleTables;

use crate::errors::ConfigError;
use crate::span::{Span, Token};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Which segmentation strategy to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Whole Penn Treebank tokens.
    #[default]
    Token,
    /// Letter runs, digit runs and single symbols.
    #[serde(alias = "sub-token")]
    Subtoken,
}

impl FromStr for Granularity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "token" => Ok(Granularity::Token),
            "subtoken" | "sub-token" => Ok(Granularity::Subtoken),
            _ => Err(ConfigError::UnknownGranularity(s.to_string())),
        }
    }
}

/// Tokenizer bound to a set of rule tables.
///
/// Cheap to clone; the tables are shared and never mutated.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    tables: Arc<RuleTables>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// A tokenizer using the Penn Treebank tables.
    pub fn new() -> Self {
        Tokenizer {
            tables: Arc::clone(&tables::PENN_TABLES),
        }
    }

    pub fn with_tables(tables: RuleTables) -> Self {
        Tokenizer {
            tables: Arc::new(tables),
        }
    }

    pub fn tables(&self) -> &RuleTables {
        &self.tables
    }

    /// Segment `span` of `text` into tokens.
    ///
    /// A span that is out of range or does not sit on character boundaries
    /// yields no tokens.
    pub fn tokenize(&self, text: &str, span: Span, granularity: Granularity) -> Vec<Token> {
        let mut out = Vec::new();
        self.tokenize_into(text, span, granularity, &mut out);
        out
    }

    /// Tokenize each sentence window in turn.
    ///
    /// Windows are expected in document order without overlap.
    pub fn tokenize_sentences(
        &self,
        text: &str,
        sentences: &[Span],
        granularity: Granularity,
    ) -> Vec<Token> {
        debug_assert!(
            sentences.windows(2).all(|w| w[0].end <= w[1].begin),
            "sentence windows overlap or are out of order"
        );
        let mut out = Vec::new();
        for sentence in sentences {
            self.tokenize_into(text, *sentence, granularity, &mut out);
        }
        out
    }

    fn tokenize_into(&self, text: &str, span: Span, granularity: Granularity, out: &mut Vec<Token>) {
        match granularity {
            Granularity::Token => penn::tokenize(&self.tables, text, span, out),
            Granularity::Subtoken => subtoken::tokenize(text, span, out),
        }
    }
}

/// Tokenize with the Penn Treebank tables.
pub fn tokenize(text: &str, span: Span, granularity: Granularity) -> Vec<Token> {
    Tokenizer::new().tokenize(text, span, granularity)
}
