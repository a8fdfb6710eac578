//! Companion treebank file lookup.
//!
//! Treebank files live in two-character subdirectories taken from the
//! document name: `wsj_0123.tml` pairs with `<directory>/01/wsj_0123.mrg`.

use crate::errors::{TreebankError, TreebankResult};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub(crate) fn default_document_extension() -> String {
    ".tml".to_string()
}

pub(crate) fn default_treebank_extension() -> String {
    ".mrg".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreebankLocator {
    /// Root of the combined treebank tree.
    pub directory: PathBuf,
    /// Stripped from the document name, if present.
    #[serde(default = "default_document_extension")]
    pub document_extension: String,
    #[serde(default = "default_treebank_extension")]
    pub treebank_extension: String,
}

impl TreebankLocator {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        TreebankLocator {
            directory: directory.into(),
            document_extension: default_document_extension(),
            treebank_extension: default_treebank_extension(),
        }
    }

    pub fn with_extensions(
        mut self,
        document_extension: impl Into<String>,
        treebank_extension: impl Into<String>,
    ) -> Self {
        self.document_extension = document_extension.into();
        self.treebank_extension = treebank_extension.into();
        self
    }

    /// Path of the treebank file for `document`, which may be a bare name
    /// or a path.
    pub fn companion_path(&self, document: &str) -> TreebankResult<PathBuf> {
        let name_error = || TreebankError::DocumentName {
            name: document.to_string(),
        };
        let name = Path::new(document)
            .file_name()
            .and_then(OsStr::to_str)
            .ok_or_else(name_error)?;
        let subdirectory = name.get(4..6).ok_or_else(name_error)?;
        if subdirectory.contains(std::path::is_separator) {
            return Err(name_error());
        }
        let stem = name
            .strip_suffix(self.document_extension.as_str())
            .unwrap_or(name);
        Ok(self
            .directory
            .join(subdirectory)
            .join(format!("{}{}", stem, self.treebank_extension)))
    }

    /// Read the treebank file for `document`.
    pub fn load(&self, document: &str) -> TreebankResult<String> {
        let path = self.companion_path(document)?;
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => TreebankError::MissingTreebank { path },
            _ => TreebankError::Io { path, source },
        })
    }
}
