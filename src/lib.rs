#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Penn-Treebank-style tokenization over immutable text spans.
//!
//! All functions are pure: they take the document text and a [`Span`] into
//! it and return owned [`Token`] values. Nothing is retained between calls,
//! so documents can be processed on as many threads as the caller likes.
//!
//! ## Modules
//!
//! - [`span`] - Half-open byte ranges and labeled tokens
//! - [`tokenizer`] - The rule cascade and its granularity strategies
//! - [`config`] - TOML configuration for tokenizer runs
//! - [`errors`] - Configuration errors
//!
//! ## Example
//!
//! ```
//! use layered_ptb::{tokenize, Granularity, Span};
//!
//! let text = "I said at 4:45pm.";
//! let tokens = tokenize(text, Span::of(text), Granularity::Token);
//! let words: Vec<&str> = tokens.iter().map(|t| t.text(text)).collect();
//! assert_eq!(words, ["I", "said", "at", "4:45", "pm", "."]);
//! ```

pub mod config;
mod display;
pub mod errors;
pub mod span;
pub mod tokenizer;

pub use config::{TableBase, TableConfig, TokenizerConfig};
pub use display::TokenDisplay;
pub use errors::{ConfigError, ConfigResult};
pub use span::{Span, Token};
pub use tokenizer::{tokenize, Granularity, RuleTables, Tokenizer};
