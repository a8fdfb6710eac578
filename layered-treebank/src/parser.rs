//! Parser for bracketed treebank notation.
//!
//! ```text
//! ( (S (NP (DT a) (NN dog)) (VP (VBD barked)) (. .)) )
//! ```
//!
//! A source holds any number of trees separated by whitespace. Terminals
//! are `(TAG text)`; the text has its treebank escapes decoded. A terminal
//! without text, such as `(-NONE- )`, is dropped, and so is a constituent
//! left without children. Any structural problem fails the whole source.

use crate::errors::{TreebankError, TreebankResult};
use crate::tree::{ParseForest, TreeNode};

/// Label given to the unlabeled outer bracket that wraps each sentence in
/// Penn Treebank `.mrg` files.
pub const ROOT_LABEL: &str = "TOP";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme<'s> {
    Open,
    Close,
    Atom(&'s str),
}

/// Parse every tree in `source`.
pub fn parse_forest(source: &str) -> TreebankResult<ParseForest> {
    Parser {
        source,
        lexemes: lex(source),
        pos: 0,
    }
    .parse()
}

/// Parse a source expected to hold exactly one tree.
pub fn parse_tree(source: &str) -> TreebankResult<TreeNode> {
    let mut forest = parse_forest(source)?;
    if forest.len() != 1 {
        return Err(TreebankError::Structural {
            line: 1,
            offset: 0,
            message: format!("expected a single tree, found {}", forest.len()),
        });
    }
    Ok(forest.remove(0))
}

fn lex(source: &str) -> Vec<(usize, Lexeme<'_>)> {
    let mut lexemes = Vec::new();
    let mut chars = source.char_indices().peekable();
    while let Some((offset, c)) = chars.next() {
        match c {
            '(' => lexemes.push((offset, Lexeme::Open)),
            ')' => lexemes.push((offset, Lexeme::Close)),
            c if c.is_whitespace() => {}
            _ => {
                let mut end = offset + c.len_utf8();
                while let Some(&(next, c)) = chars.peek() {
                    if c.is_whitespace() || c == '(' || c == ')' {
                        break;
                    }
                    end = next + c.len_utf8();
                    chars.next();
                }
                lexemes.push((offset, Lexeme::Atom(&source[offset..end])));
            }
        }
    }
    lexemes
}

struct Parser<'s> {
    source: &'s str,
    lexemes: Vec<(usize, Lexeme<'s>)>,
    pos: usize,
}

impl<'s> Parser<'s> {
    fn parse(mut self) -> TreebankResult<ParseForest> {
        let mut forest = Vec::new();
        while let Some((offset, lexeme)) = self.next() {
            match lexeme {
                Lexeme::Open => {
                    if let Some(tree) = self.node(offset, true)? {
                        forest.push(tree);
                    }
                }
                Lexeme::Close => return Err(self.error(offset, "unbalanced ')'")),
                Lexeme::Atom(atom) => {
                    return Err(self.error(
                        offset,
                        format!("text '{}' outside of a bracketed tree", atom),
                    ))
                }
            }
        }
        Ok(forest)
    }

    /// Parse the node opened at `open`, whose `(` was just consumed.
    fn node(&mut self, open: usize, root: bool) -> TreebankResult<Option<TreeNode>> {
        let label = match self.peek() {
            Some((_, Lexeme::Atom(label))) => {
                self.pos += 1;
                label
            }
            Some((_, Lexeme::Open)) if root => ROOT_LABEL,
            Some((offset, _)) => return Err(self.error(offset, "node without a label")),
            None => return Err(self.error(open, "unclosed '('")),
        };

        let mut children = Vec::new();
        loop {
            match self.next() {
                Some((offset, Lexeme::Open)) => {
                    if let Some(child) = self.node(offset, false)? {
                        children.push(child);
                    }
                }
                Some((_, Lexeme::Close)) => break,
                Some((offset, Lexeme::Atom(text))) => {
                    if !children.is_empty() {
                        return Err(self.error(offset, "leaf text mixed with child nodes"));
                    }
                    match self.next() {
                        Some((_, Lexeme::Close)) => {}
                        Some((offset, _)) => {
                            return Err(self.error(offset, "expected ')' after leaf text"))
                        }
                        None => return Err(self.error(open, "unclosed '('")),
                    }
                    let terminal = TreeNode::terminal(label, text);
                    let empty = terminal.leaf().map_or(true, |leaf| leaf.text.is_empty());
                    return Ok(if empty { None } else { Some(terminal) });
                }
                None => return Err(self.error(open, "unclosed '('")),
            }
        }

        if children.is_empty() {
            return Ok(None);
        }
        Ok(Some(TreeNode::internal(label, children)))
    }

    fn peek(&self) -> Option<(usize, Lexeme<'s>)> {
        self.lexemes.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<(usize, Lexeme<'s>)> {
        let lexeme = self.peek()?;
        self.pos += 1;
        Some(lexeme)
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> TreebankError {
        TreebankError::Structural {
            line: count_lines(self.source, offset),
            offset,
            message: message.into(),
        }
    }
}

/// Count lines up to a byte position (for error messages).
fn count_lines(input: &str, byte_pos: usize) -> usize {
    input[..byte_pos.min(input.len())]
        .chars()
        .filter(|&c| c == '\n')
        .count()
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structural_message(source: &str) -> (usize, String) {
        match parse_forest(source) {
            Err(TreebankError::Structural { line, message, .. }) => (line, message),
            other => panic!("expected a structural error, got {:?}", other),
        }
    }

    #[test]
    fn parses_a_simple_tree() {
        let tree = parse_tree("(NP (DT a) (NN dog))").unwrap();
        assert_eq!(tree.label, "NP");
        assert_eq!(tree.children().len(), 2);
        assert_eq!(tree.to_string(), "(NP (DT a) (NN dog))");
    }

    #[test]
    fn unlabeled_outer_bracket_becomes_top() {
        let forest = parse_forest("( (S (NP (PRP I)) (VP (VBD ran))) )\n( (S (NN Go)) )").unwrap();
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].label, ROOT_LABEL);
        assert_eq!(forest[0].children()[0].label, "S");
    }

    #[test]
    fn decodes_escapes_and_keeps_raw_text() {
        let tree = parse_tree("(NP (-LRB- -LRB-) (CD 1\\/2) (-RRB- -RRB-))").unwrap();
        let terminals = tree.terminals();
        let leaves: Vec<(&str, &str)> = terminals
            .iter()
            .map(|t| {
                let leaf = t.leaf().unwrap();
                (leaf.raw.as_str(), leaf.text.as_str())
            })
            .collect();
        assert_eq!(leaves, vec![("-LRB-", "("), ("1\\/2", "1/2"), ("-RRB-", ")")]);
        assert_eq!(terminals[0].label, "-LRB-");
    }

    #[test]
    fn drops_empty_leaves_and_emptied_constituents() {
        let tree = parse_tree("(S (NP (-NONE- )) (VP (VB go) (X)))").unwrap();
        assert_eq!(tree.to_string(), "(S (VP (VB go)))");
    }

    #[test]
    fn keeps_null_elements_with_text() {
        let tree = parse_tree("(S (NP-SBJ (-NONE- *-1)) (VP (VB go)))").unwrap();
        assert!(tree.terminals()[0].is_null_element());
    }

    #[test]
    fn empty_source_is_an_empty_forest() {
        assert!(parse_forest("  \n ").unwrap().is_empty());
    }

    #[test]
    fn structural_errors() {
        assert_eq!(structural_message("(NP (DT a)").1, "unclosed '('");
        assert_eq!(structural_message("(NP (DT a)))").1, "unbalanced ')'");
        assert_eq!(structural_message("()").1, "node without a label");
        assert_eq!(structural_message("(NP ((DT a)))").1, "node without a label");
        assert_eq!(
            structural_message("(NNP New York)").1,
            "expected ')' after leaf text"
        );
        assert_eq!(
            structural_message("(NP (DT a) dog)").1,
            "leaf text mixed with child nodes"
        );
        assert_eq!(
            structural_message("dog (NN dog)").1,
            "text 'dog' outside of a bracketed tree"
        );
    }

    #[test]
    fn structural_errors_report_lines() {
        let (line, _) = structural_message("(S (NN a))\n(S (NN b)\n");
        assert_eq!(line, 2);
    }

    #[test]
    fn no_partial_forest_on_error() {
        assert!(parse_forest("(S (NN a)) (S (NN b)").is_err());
    }
}
