//! Half-open offset ranges over an immutable document text.
//!
//! Every offset is a byte offset into a UTF-8 `&str` and always falls on a
//! character boundary. Nothing in this module holds on to the text itself;
//! callers pass it back in when they want the covered slice.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open `[begin, end)` range into a document text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
}

impl Span {
    pub fn new(begin: usize, end: usize) -> Self {
        debug_assert!(begin <= end, "span begins after it ends: {}..{}", begin, end);
        Span { begin, end }
    }

    /// A zero-width marker at `offset`.
    pub fn empty_at(offset: usize) -> Self {
        Span {
            begin: offset,
            end: offset,
        }
    }

    /// The span covering all of `text`.
    pub fn of(text: &str) -> Self {
        Span::new(0, text.len())
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Returns true if `offset` lies inside the span.
    pub fn contains(&self, offset: usize) -> bool {
        self.begin <= offset && offset < self.end
    }

    /// Returns true if `other` lies entirely inside this span.
    pub fn covers(&self, other: &Span) -> bool {
        self.begin <= other.begin && other.end <= self.end
    }

    /// Smallest span covering both.
    pub fn join(&self, other: &Span) -> Span {
        Span::new(self.begin.min(other.begin), self.end.max(other.end))
    }

    /// The covered slice of `text`, or `None` if the span is out of range
    /// or does not sit on character boundaries.
    pub fn get<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.get(self.begin..self.end)
    }

    /// The covered slice of `text`.
    ///
    /// # Panics
    ///
    /// Panics if the span does not belong to `text`.
    pub fn text<'t>(&self, text: &'t str) -> &'t str {
        &text[self.begin..self.end]
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.begin, self.end)
    }
}

/// A span with an optional category label.
///
/// Tokens produced by the tokenizer carry no label; tokens derived from an
/// aligned treebank carry the part-of-speech tag of their leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub span: Span,
    pub label: Option<String>,
    /// Normalized Penn surface for quote tokens (`` `` ``, `''`, `` ` ``, `'`).
    pub form: Option<&'static str>,
}

impl Token {
    pub fn new(span: Span) -> Self {
        Token {
            span,
            label: None,
            form: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_form(mut self, form: &'static str) -> Self {
        self.form = Some(form);
        self
    }

    pub fn text<'t>(&self, text: &'t str) -> &'t str {
        self.span.text(text)
    }

    /// The Penn surface of the token: its normalized form when it has one,
    /// otherwise the covered text.
    pub fn surface<'t>(&self, text: &'t str) -> &'t str {
        match self.form {
            Some(form) => form,
            None => self.text(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_basics() {
        let text = "Jane thought";
        let span = Span::new(5, 12);
        assert_eq!(span.len(), 7);
        assert_eq!(span.text(text), "thought");
        assert!(span.contains(5));
        assert!(!span.contains(12));
        assert!(Span::of(text).covers(&span));
        assert!(!span.covers(&Span::new(4, 6)));
        assert_eq!(Span::new(0, 4).join(&span), Span::of(text));
    }

    #[test]
    fn zero_width_spans() {
        let span = Span::empty_at(3);
        assert!(span.is_empty());
        assert!(!span.contains(3));
        assert_eq!(span.text("abcdef"), "");
    }

    #[test]
    fn get_rejects_split_characters() {
        let text = "naïve";
        assert_eq!(Span::new(0, 2).get(text), Some("na"));
        assert_eq!(Span::new(0, 3).get(text), None);
        assert_eq!(Span::new(0, 40).get(text), None);
    }

    #[test]
    fn quote_tokens_expose_their_form() {
        let text = "\"Hi\"";
        let open = Token::new(Span::new(0, 1)).with_form("``");
        let word = Token::new(Span::new(1, 3));
        assert_eq!(open.surface(text), "``");
        assert_eq!(open.text(text), "\"");
        assert_eq!(word.surface(text), "Hi");
    }
}
