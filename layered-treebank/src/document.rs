//! Document-level alignment.
//!
//! Ties the parser and the aligner together for one document: pick the
//! text region, parse the treebank source, align it, and collect sentence
//! and token spans. A document whose leaves cannot be aligned is skipped
//! with a warning; configuration and structural problems are errors.

use crate::align::{Aligner, AlignmentFailure};
use crate::config::TreebankConfig;
use crate::errors::{TreebankError, TreebankResult};
use crate::locator::TreebankLocator;
use crate::parser::parse_forest;
use crate::tree::{forest_terminals, ParseForest, TreeNode};
use layered_ptb::{Span, Token};

/// The single text region of a document.
pub fn select_text_region(regions: &[Span]) -> TreebankResult<Span> {
    match regions {
        [region] => Ok(*region),
        _ => Err(TreebankError::TextRegion {
            found: regions.len(),
        }),
    }
}

/// A document whose forest aligned in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedDocument {
    pub forest: ParseForest,
    /// One span per tree that covers text.
    pub sentences: Vec<Span>,
    /// One token per non-null terminal that covers text, labeled with its
    /// part of speech.
    pub tokens: Vec<Token>,
}

impl AlignedDocument {
    pub fn from_forest(forest: ParseForest) -> Self {
        let sentences = forest
            .iter()
            .filter_map(|tree| tree.span)
            .filter(|span| !span.is_empty())
            .collect();
        let tokens = forest_terminals(&forest)
            .into_iter()
            .filter_map(TreeNode::to_token)
            .collect();
        AlignedDocument {
            forest,
            sentences,
            tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentAlignment {
    Aligned(AlignedDocument),
    /// Nothing from this document should be annotated.
    Skipped(AlignmentFailure),
}

impl DocumentAlignment {
    pub fn aligned(&self) -> Option<&AlignedDocument> {
        match self {
            DocumentAlignment::Aligned(document) => Some(document),
            DocumentAlignment::Skipped(_) => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, DocumentAlignment::Skipped(_))
    }
}

/// Align `treebank_source` against the text region of one document.
pub fn align_document(
    document_id: &str,
    text: &str,
    text_regions: &[Span],
    treebank_source: &str,
    aligner: &Aligner,
) -> TreebankResult<DocumentAlignment> {
    let region = select_text_region(text_regions)?;
    let forest = parse_forest(treebank_source)?;
    match aligner.align(text, region.begin, forest) {
        Ok(forest) => Ok(DocumentAlignment::Aligned(AlignedDocument::from_forest(
            forest,
        ))),
        Err(failure) => {
            tracing::warn!(
                document = document_id,
                leaf_index = failure.leaf_index,
                leaf = %failure.leaf_text,
                offset = failure.offset,
                "skipping document due to alignment problems"
            );
            Ok(DocumentAlignment::Skipped(failure))
        }
    }
}

/// Locates each document's treebank file and aligns it.
#[derive(Debug, Clone)]
pub struct TreebankPipeline {
    locator: TreebankLocator,
    aligner: Aligner,
}

impl TreebankPipeline {
    pub fn new(locator: TreebankLocator) -> Self {
        TreebankPipeline {
            locator,
            aligner: Aligner::new(),
        }
    }

    pub fn with_aligner(mut self, aligner: Aligner) -> Self {
        self.aligner = aligner;
        self
    }

    pub fn from_config(config: &TreebankConfig) -> Self {
        TreebankPipeline::new(config.locator()).with_aligner(config.aligner())
    }

    pub fn locator(&self) -> &TreebankLocator {
        &self.locator
    }

    /// Process one document. The text region is checked before the
    /// treebank file is read.
    pub fn process(
        &self,
        document: &str,
        text: &str,
        text_regions: &[Span],
    ) -> TreebankResult<DocumentAlignment> {
        select_text_region(text_regions)?;
        let source = self.locator.load(document)?;
        align_document(document, text, text_regions, &source, &self.aligner)
    }
}
