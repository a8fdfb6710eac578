//! Alignment of treebank leaves to raw document text.
//!
//! A single cursor walks the raw text left to right. Each leaf must match at
//! the cursor once whitespace has been skipped; when it does not, the
//! configured [`Recovery`] strategies are tried in order. The first leaf
//! that nothing can place fails the whole forest, and no node receives a
//! span.

use crate::normalize::{canonical_units, is_quote_unit, match_at, MatchMode, SINGLE_QUOTE};
use crate::tree::{forest_terminals, NodeBody, ParseForest, TreeNode};
use layered_ptb::Span;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback comparisons tried when a leaf does not match as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recovery {
    /// Single and double quote glyphs compare equal.
    QuoteDirection,
    /// The leaf's apostrophes are dropped, for raw text that writes a
    /// contraction without one.
    ContractionBoundary,
    /// Leaf hyphens are dropped, or raw hyphens (and a line break after
    /// them) are skipped inside the leaf.
    Hyphenation,
    /// A `.` leaf repeating the final period of the previous leaf gets a
    /// zero-width span at that leaf's end.
    SharedPeriod,
}

impl Recovery {
    pub const ALL: [Recovery; 4] = [
        Recovery::QuoteDirection,
        Recovery::ContractionBoundary,
        Recovery::Hyphenation,
        Recovery::SharedPeriod,
    ];
}

fn default_recoveries() -> Vec<Recovery> {
    Recovery::ALL.to_vec()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlignConfig {
    /// Tried in this order after an exact match fails.
    #[serde(default = "default_recoveries")]
    pub recoveries: Vec<Recovery>,
}

impl Default for AlignConfig {
    fn default() -> Self {
        AlignConfig {
            recoveries: default_recoveries(),
        }
    }
}

impl AlignConfig {
    /// Exact matching only.
    pub fn strict() -> Self {
        AlignConfig {
            recoveries: Vec::new(),
        }
    }

    pub fn with_recoveries(mut self, recoveries: &[Recovery]) -> Self {
        self.recoveries = recoveries.to_vec();
        self
    }
}

/// A leaf the aligner has to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected<'a> {
    /// Decoded leaf text.
    Literal(&'a str),
    /// A null element: takes a zero-width span at the cursor.
    Null,
}

impl<'a> Expected<'a> {
    pub fn of(terminal: &'a TreeNode) -> Self {
        match terminal.leaf() {
            Some(_) if terminal.is_null_element() => Expected::Null,
            Some(leaf) => Expected::Literal(&leaf.text),
            None => Expected::Null,
        }
    }
}

/// Where a leaf was placed, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafMatch {
    pub span: Span,
    /// `None` for an exact match or a null element.
    pub recovery: Option<Recovery>,
}

/// A leaf that could not be placed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("leaf {leaf_index} ({leaf_text:?}) does not match the text at offset {offset}")]
pub struct AlignmentFailure {
    /// Position of the leaf among all terminals of the forest.
    pub leaf_index: usize,
    pub leaf_text: String,
    /// Cursor position when matching gave up.
    pub offset: usize,
}

/// A fully spanned forest, or the leaf that stopped alignment.
pub type AlignmentOutcome = Result<ParseForest, AlignmentFailure>;

enum State<'a> {
    Scanning,
    Matching,
    Recovering(&'a str),
}

#[derive(Debug, Clone, Default)]
pub struct Aligner {
    config: AlignConfig,
}

impl Aligner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AlignConfig) -> Self {
        Aligner { config }
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Align every terminal of `forest` against `text`, starting at byte
    /// offset `start`, and span every node.
    pub fn align(&self, text: &str, start: usize, mut forest: ParseForest) -> AlignmentOutcome {
        let matches = {
            let expected: Vec<Expected<'_>> = forest_terminals(&forest)
                .into_iter()
                .map(Expected::of)
                .collect();
            self.align_leaves(text, start, &expected)?
        };
        let spans: Vec<Span> = matches.iter().map(|m| m.span).collect();

        let mut remaining = spans.iter();
        for tree in forest.iter_mut() {
            if assign_spans(tree, &mut remaining).is_none() {
                return Err(AlignmentFailure {
                    leaf_index: spans.len(),
                    leaf_text: String::new(),
                    offset: text.len(),
                });
            }
        }
        Ok(forest)
    }

    /// Place a flat sequence of leaves, one match per leaf.
    pub fn align_leaves(
        &self,
        text: &str,
        start: usize,
        leaves: &[Expected<'_>],
    ) -> Result<Vec<LeafMatch>, AlignmentFailure> {
        if !text.is_char_boundary(start) {
            let leaf_text = match leaves.first() {
                Some(Expected::Literal(leaf)) => leaf.to_string(),
                _ => String::new(),
            };
            return Err(AlignmentFailure {
                leaf_index: 0,
                leaf_text,
                offset: start,
            });
        }

        let mut matches: Vec<LeafMatch> = Vec::with_capacity(leaves.len());
        let mut cursor = start;
        let mut state = State::Scanning;
        loop {
            let index = matches.len();
            state = match state {
                State::Scanning => {
                    cursor = skip_whitespace(text, cursor);
                    if index == leaves.len() {
                        return Ok(matches);
                    }
                    State::Matching
                }
                State::Matching => match leaves[index] {
                    Expected::Null => {
                        matches.push(LeafMatch {
                            span: Span::empty_at(cursor),
                            recovery: None,
                        });
                        State::Scanning
                    }
                    Expected::Literal(leaf) => {
                        match match_at(text, cursor, &canonical_units(leaf), MatchMode::EXACT) {
                            Some(end) => {
                                matches.push(LeafMatch {
                                    span: Span::new(cursor, end),
                                    recovery: None,
                                });
                                cursor = end;
                                State::Scanning
                            }
                            None => State::Recovering(leaf),
                        }
                    }
                },
                State::Recovering(leaf) => {
                    let recovered = self.config.recoveries.iter().find_map(|&recovery| {
                        recover(recovery, text, cursor, leaf, &matches).map(|span| (recovery, span))
                    });
                    match recovered {
                        Some((recovery, span)) => {
                            matches.push(LeafMatch {
                                span,
                                recovery: Some(recovery),
                            });
                            cursor = cursor.max(span.end);
                            State::Scanning
                        }
                        None => {
                            return Err(AlignmentFailure {
                                leaf_index: index,
                                leaf_text: leaf.to_string(),
                                offset: cursor,
                            })
                        }
                    }
                }
            };
        }
    }
}

fn skip_whitespace(text: &str, cursor: usize) -> usize {
    let rest = &text[cursor..];
    cursor + rest.len() - rest.trim_start().len()
}

fn recover(
    recovery: Recovery,
    text: &str,
    cursor: usize,
    leaf: &str,
    matches: &[LeafMatch],
) -> Option<Span> {
    let units = canonical_units(leaf);
    let end = match recovery {
        Recovery::QuoteDirection => {
            if !units.iter().any(|&u| is_quote_unit(u)) {
                return None;
            }
            let mode = MatchMode {
                quotes_interchangeable: true,
                ..MatchMode::EXACT
            };
            match_at(text, cursor, &units, mode)
        }
        Recovery::ContractionBoundary => {
            if !units.contains(&SINGLE_QUOTE) {
                return None;
            }
            let stripped: Vec<char> = units.into_iter().filter(|&u| u != SINGLE_QUOTE).collect();
            if stripped.is_empty() {
                return None;
            }
            match_at(text, cursor, &stripped, MatchMode::EXACT)
        }
        Recovery::Hyphenation => {
            let collapsed: Vec<char> = units.iter().copied().filter(|&u| u != '-').collect();
            let expand = MatchMode {
                skip_raw_hyphens: true,
                ..MatchMode::EXACT
            };
            let collapse = if collapsed.len() < units.len() && !collapsed.is_empty() {
                match_at(text, cursor, &collapsed, MatchMode::EXACT)
            } else {
                None
            };
            collapse.or_else(|| match_at(text, cursor, &units, expand))
        }
        Recovery::SharedPeriod => {
            if leaf != "." {
                return None;
            }
            let previous = matches.iter().rev().find(|m| !m.span.is_empty())?;
            let covered = previous.span.get(text)?;
            return (covered.len() > 1 && covered.ends_with('.'))
                .then(|| Span::empty_at(previous.span.end));
        }
    }?;
    Some(Span::new(cursor, end))
}

/// Assign spans to `node` and its descendants from `spans`, which yields
/// one span per terminal in document order. Returns the node's span and
/// whether it covers anything besides null elements.
fn assign_spans(node: &mut TreeNode, spans: &mut std::slice::Iter<'_, Span>) -> Option<(Span, bool)> {
    let null = node.is_null_element();
    let (span, content) = match &mut node.body {
        NodeBody::Terminal(_) => (*spans.next()?, !null),
        NodeBody::Internal(children) => {
            let mut first = None;
            let mut covering: Option<Span> = None;
            for child in children.iter_mut() {
                let (span, content) = assign_spans(child, spans)?;
                first.get_or_insert(span);
                if content {
                    covering = Some(covering.map_or(span, |c| c.join(&span)));
                }
            }
            match covering {
                Some(span) => (span, true),
                None => (first?, false),
            }
        }
    };
    node.span = Some(span);
    Some((span, content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_forest;
    use std::time::{Duration, Instant};

    fn placed(text: &str, leaves: &[Expected<'_>]) -> Vec<(String, Option<Recovery>)> {
        Aligner::new()
            .align_leaves(text, 0, leaves)
            .unwrap()
            .into_iter()
            .map(|m| (m.span.text(text).to_string(), m.recovery))
            .collect()
    }

    #[test]
    fn exact_leaves_skip_whitespace() {
        let leaves = [Expected::Literal("a"), Expected::Literal("dog")];
        let matches = Aligner::new().align_leaves("  a \n dog ", 0, &leaves).unwrap();
        let spans: Vec<Span> = matches.iter().map(|m| m.span).collect();
        assert_eq!(spans, vec![Span::new(2, 3), Span::new(6, 9)]);
        assert!(matches.iter().all(|m| m.recovery.is_none()));
    }

    #[test]
    fn null_elements_sit_at_the_cursor() {
        let leaves = [Expected::Literal("go"), Expected::Null, Expected::Literal("home")];
        let matches = Aligner::new().align_leaves("go  home", 0, &leaves).unwrap();
        assert_eq!(matches[1].span, Span::empty_at(4));
    }

    #[test]
    fn quote_direction() {
        let leaves = [
            Expected::Literal("``"),
            Expected::Literal("Hi"),
            Expected::Literal("''"),
        ];
        assert_eq!(
            placed("'Hi'", &leaves),
            vec![
                ("'".to_string(), Some(Recovery::QuoteDirection)),
                ("Hi".to_string(), None),
                ("'".to_string(), Some(Recovery::QuoteDirection)),
            ]
        );
    }

    #[test]
    fn contraction_boundary() {
        assert_eq!(
            placed("dont", &[Expected::Literal("do"), Expected::Literal("n't")]),
            vec![
                ("do".to_string(), None),
                ("nt".to_string(), Some(Recovery::ContractionBoundary)),
            ]
        );
    }

    #[test]
    fn hyphenation_both_ways() {
        assert_eq!(
            placed("nonexecutive", &[Expected::Literal("non-executive")]),
            vec![("nonexecutive".to_string(), Some(Recovery::Hyphenation))]
        );
        assert_eq!(
            placed("non-\nexecutive", &[Expected::Literal("nonexecutive")]),
            vec![("non-\nexecutive".to_string(), Some(Recovery::Hyphenation))]
        );
    }

    #[test]
    fn shared_period() {
        let leaves = [
            Expected::Literal("in"),
            Expected::Literal("the"),
            Expected::Literal("U.S."),
            Expected::Literal("."),
            Expected::Literal("Then"),
        ];
        let matches = Aligner::new()
            .align_leaves("in the U.S. Then", 0, &leaves)
            .unwrap();
        assert_eq!(matches[3].span, Span::empty_at(11));
        assert_eq!(matches[3].recovery, Some(Recovery::SharedPeriod));
        assert_eq!(matches[4].span, Span::new(12, 16));
    }

    #[test]
    fn quote_heavy_leaf_aligns_promptly() {
        let leaf = "\"".repeat(40);
        let leaves = [Expected::Literal(&leaf)];
        let started = Instant::now();

        let text = format!("{} x", "'".repeat(40));
        let matches = Aligner::new().align_leaves(&text, 0, &leaves).unwrap();
        assert_eq!(matches[0].span, Span::new(0, 40));
        assert_eq!(matches[0].recovery, Some(Recovery::QuoteDirection));

        let text = format!("{}x", "'".repeat(39));
        let failure = Aligner::new().align_leaves(&text, 0, &leaves).unwrap_err();
        assert_eq!(failure.leaf_index, 0);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn strict_config_disables_recoveries() {
        let aligner = Aligner::with_config(AlignConfig::strict());
        let failure = aligner
            .align_leaves("'Hi'", 0, &[Expected::Literal("``")])
            .unwrap_err();
        assert_eq!(failure.leaf_index, 0);
        assert_eq!(failure.offset, 0);
    }

    #[test]
    fn missing_word_reports_leaf_and_offset() {
        let leaves = [Expected::Literal("a"), Expected::Literal("dog")];
        let failure = Aligner::new()
            .align_leaves("a big dog", 0, &leaves)
            .unwrap_err();
        assert_eq!(
            failure,
            AlignmentFailure {
                leaf_index: 1,
                leaf_text: "dog".to_string(),
                offset: 2,
            }
        );
        assert_eq!(
            failure.to_string(),
            "leaf 1 (\"dog\") does not match the text at offset 2"
        );
    }

    #[test]
    fn start_off_a_char_boundary_fails() {
        assert!(Aligner::new()
            .align_leaves("é", 1, &[Expected::Literal("x")])
            .is_err());
    }

    #[test]
    fn internal_spans_ignore_null_elements() {
        let forest =
            parse_forest("( (S (NP-SBJ (-NONE- *)) (VP (VB Go) (ADVP (RB home))) (. .)) )").unwrap();
        let text = "Go home.";
        let forest = Aligner::new().align(text, 0, forest).unwrap();
        let s = &forest[0].children()[0];
        assert_eq!(s.span, Some(Span::new(0, 8)));
        assert_eq!(forest[0].span, Some(Span::new(0, 8)));
        let np = &s.children()[0];
        assert_eq!(np.span, Some(Span::empty_at(0)));
        assert_eq!(s.children()[1].covered_text(text), Some("Go home"));
    }

    #[test]
    fn config_from_toml_names() {
        let config: AlignConfig =
            toml::from_str("recoveries = [\"hyphenation\", \"shared_period\"]").unwrap();
        assert_eq!(
            config.recoveries,
            vec![Recovery::Hyphenation, Recovery::SharedPeriod]
        );
        let config: AlignConfig = toml::from_str("").unwrap();
        assert_eq!(config, AlignConfig::default());
    }
}
