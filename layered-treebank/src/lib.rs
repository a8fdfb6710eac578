#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Treebank parsing and alignment for `layered-ptb`.
//!
//! Parse bracketed Penn Treebank sources into a [`ParseForest`], then align
//! the forest's leaves against the raw document text so that every node
//! carries a [`Span`](layered_ptb::Span) into it.
//!
//! ## Modules
//!
//! - [`parser`] - Bracket notation to trees
//! - [`tree`] - The tree model
//! - [`align`] - The streaming leaf matcher and its recoveries
//! - [`document`] - Per-document alignment with skip-on-failure
//! - [`locator`] - Companion file lookup
//! - [`config`] - TOML configuration
//!
//! ## Example
//!
//! ```
//! use layered_treebank::{parse_forest, Aligner};
//!
//! let text = "A \u{201C}dog\u{201D} (maybe) barked.";
//! let forest = parse_forest(
//!     "( (S (NP (DT A) (`` ``) (NN dog) ('' '') (-LRB- -LRB-) (RB maybe) (-RRB- -RRB-))
//!          (VP (VBD barked)) (. .)) )",
//! )
//! .unwrap();
//! let forest = Aligner::new().align(text, 0, forest).unwrap();
//! let np = &forest[0].children()[0].children()[0];
//! assert_eq!(np.covered_text(text), Some("A \u{201C}dog\u{201D} (maybe)"));
//! ```

pub mod align;
pub mod config;
pub mod document;
pub mod errors;
mod escape;
pub mod locator;
pub mod normalize;
pub mod parser;
pub mod tree;

pub use align::{AlignConfig, Aligner, AlignmentFailure, AlignmentOutcome, Expected, LeafMatch, Recovery};
pub use config::TreebankConfig;
pub use document::{
    align_document, select_text_region, AlignedDocument, DocumentAlignment, TreebankPipeline,
};
pub use errors::{TreebankError, TreebankResult};
pub use escape::unescape;
pub use locator::TreebankLocator;
pub use parser::{parse_forest, parse_tree, ROOT_LABEL};
pub use tree::{forest_terminals, Leaf, NodeBody, ParseForest, TreeNode, NULL_ELEMENT};

#[cfg(test)]
mod tests {
    mod alignment;
    mod pipeline;
    mod properties;
}
