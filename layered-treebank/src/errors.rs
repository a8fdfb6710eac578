//! Error types for treebank parsing and document-level processing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort processing of a treebank source.
///
/// Alignment problems are not in here: they are reported through
/// [`AlignmentFailure`](crate::AlignmentFailure) so that the caller can skip
/// the document and carry on.
#[derive(Debug, Error)]
pub enum TreebankError {
    /// Malformed bracket nesting or a node without a label.
    #[error("structural error at line {line} (offset {offset}): {message}")]
    Structural {
        line: usize,
        offset: usize,
        message: String,
    },

    /// The document must designate exactly one text region.
    #[error("expected 1 text region, found {found}")]
    TextRegion { found: usize },

    /// The document name does not follow the treebank naming convention.
    #[error("cannot derive a treebank file from document name '{name}'")]
    DocumentName { name: String },

    /// The companion treebank file does not exist.
    #[error("missing treebank file {}", path.display())]
    MissingTreebank { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid treebank configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for treebank operations.
pub type TreebankResult<T> = Result<T, TreebankError>;
