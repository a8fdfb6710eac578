//! Character-class segmentation.
//!
//! Letter runs and digit runs form one sub-token each; every other
//! non-whitespace character stands alone. The lexical tables play no part.

use crate::span::{Span, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Space,
    Letter,
    Digit,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_whitespace() {
            CharClass::Space
        } else if c.is_alphabetic() {
            CharClass::Letter
        } else if c.is_numeric() {
            CharClass::Digit
        } else {
            CharClass::Other
        }
    }

    fn joins(self) -> bool {
        matches!(self, CharClass::Letter | CharClass::Digit)
    }
}

pub(crate) fn tokenize(text: &str, span: Span, out: &mut Vec<Token>) {
    let Some(window) = span.get(text) else {
        return;
    };
    let mut current: Option<(usize, CharClass)> = None;
    for (idx, c) in window.char_indices() {
        let offset = span.begin + idx;
        let class = CharClass::of(c);
        if let Some((begin, open)) = current {
            if open == class && class.joins() {
                continue;
            }
            out.push(Token::new(Span::new(begin, offset)));
            current = None;
        }
        if class != CharClass::Space {
            current = Some((offset, class));
        }
    }
    if let Some((begin, _)) = current {
        out.push(Token::new(Span::new(begin, span.end)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<&str> {
        let mut out = Vec::new();
        tokenize(input, Span::of(input), &mut out);
        out.iter().map(|t| t.text(input)).collect()
    }

    #[test]
    fn splits_at_every_class_boundary() {
        assert_eq!(texts("F16s"), vec!["F", "16", "s"]);
        assert_eq!(texts("can't"), vec!["can", "'", "t"]);
        assert_eq!(texts("..."), vec![".", ".", "."]);
    }

    #[test]
    fn whitespace_only() {
        assert!(texts(" \t\n ").is_empty());
    }
}
