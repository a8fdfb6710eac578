//! Treebank pipeline configuration.
//!
//! ```toml
//! directory = "/data/treebank/combined/wsj"
//! treebank_extension = ".mrg"
//!
//! [align]
//! recoveries = ["quote_direction", "hyphenation", "shared_period"]
//! ```

use crate::align::{AlignConfig, Aligner};
use crate::errors::{TreebankError, TreebankResult};
use crate::locator::{default_document_extension, default_treebank_extension, TreebankLocator};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreebankConfig {
    pub directory: PathBuf,
    #[serde(default = "default_document_extension")]
    pub document_extension: String,
    #[serde(default = "default_treebank_extension")]
    pub treebank_extension: String,
    #[serde(default)]
    pub align: AlignConfig,
}

impl TreebankConfig {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        TreebankConfig {
            directory: directory.into(),
            document_extension: default_document_extension(),
            treebank_extension: default_treebank_extension(),
            align: AlignConfig::default(),
        }
    }

    pub fn from_toml_str(input: &str) -> TreebankResult<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> TreebankResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| TreebankError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            directory = %config.directory.display(),
            recoveries = ?config.align.recoveries,
            "loaded treebank configuration"
        );
        Ok(config)
    }

    pub fn locator(&self) -> TreebankLocator {
        TreebankLocator::new(&self.directory)
            .with_extensions(&self.document_extension, &self.treebank_extension)
    }

    pub fn aligner(&self) -> Aligner {
        Aligner::with_config(self.align.clone())
    }
}
