//! Parse tree model.
//!
//! Trees come out of the parser without spans. The aligner fills in a span
//! for every node in one go, or leaves the whole forest untouched.

use crate::escape::unescape;
use layered_ptb::{Span, Token};
use std::fmt;

/// Part-of-speech label of treebank null elements (traces, empty
/// complementizers and the like).
pub const NULL_ELEMENT: &str = "-NONE-";

/// Ordered roots of one treebank source, in sentence order.
pub type ParseForest = Vec<TreeNode>;

/// Literal text of a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    /// Text as written in the treebank, escapes included.
    pub raw: String,
    /// Text with treebank escapes decoded.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeBody {
    Internal(Vec<TreeNode>),
    Terminal(Leaf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Constituent label, or the part-of-speech tag of a terminal.
    pub label: String,
    pub body: NodeBody,
    /// Set once the tree has been aligned.
    pub span: Option<Span>,
}

impl TreeNode {
    pub fn internal(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        TreeNode {
            label: label.into(),
            body: NodeBody::Internal(children),
            span: None,
        }
    }

    /// A terminal whose text is decoded from `raw`.
    pub fn terminal(label: impl Into<String>, raw: impl Into<String>) -> Self {
        let raw = raw.into();
        TreeNode {
            label: label.into(),
            body: NodeBody::Terminal(Leaf {
                text: unescape(&raw),
                raw,
            }),
            span: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.body, NodeBody::Terminal(_))
    }

    /// True for terminals tagged [`NULL_ELEMENT`].
    pub fn is_null_element(&self) -> bool {
        self.is_terminal() && self.label == NULL_ELEMENT
    }

    pub fn children(&self) -> &[TreeNode] {
        match &self.body {
            NodeBody::Internal(children) => children,
            NodeBody::Terminal(_) => &[],
        }
    }

    pub fn leaf(&self) -> Option<&Leaf> {
        match &self.body {
            NodeBody::Terminal(leaf) => Some(leaf),
            NodeBody::Internal(_) => None,
        }
    }

    /// Terminals below this node in document order.
    pub fn terminals(&self) -> Vec<&TreeNode> {
        let mut out = Vec::new();
        self.collect_terminals(&mut out);
        out
    }

    fn collect_terminals<'a>(&'a self, out: &mut Vec<&'a TreeNode>) {
        match &self.body {
            NodeBody::Terminal(_) => out.push(self),
            NodeBody::Internal(children) => {
                for child in children {
                    child.collect_terminals(out);
                }
            }
        }
    }

    /// Covered raw text, once aligned.
    pub fn covered_text<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.span.and_then(|span| span.get(text))
    }

    /// A token for this terminal if it is aligned, covers text, and is not a
    /// null element.
    pub fn to_token(&self) -> Option<Token> {
        let span = self.span?;
        if !self.is_terminal() || self.is_null_element() || span.is_empty() {
            return None;
        }
        Some(Token::new(span).with_label(self.label.clone()))
    }
}

/// Terminals of every tree in the forest, in document order.
pub fn forest_terminals(forest: &[TreeNode]) -> Vec<&TreeNode> {
    forest.iter().flat_map(TreeNode::terminals).collect()
}

/// Renders back to bracket notation with the raw leaf text.
impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            NodeBody::Terminal(leaf) => write!(f, "({} {})", self.label, leaf.raw),
            NodeBody::Internal(children) => {
                write!(f, "({}", self.label)?;
                for child in children {
                    write!(f, " {}", child)?;
                }
                f.write_str(")")
            }
        }
    }
}
