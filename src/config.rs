//! Tokenizer configuration.
//!
//! ```toml
//! granularity = "token"
//!
//! [tables]
//! base = "penn"
//! abbreviations = ["Calif", "Ariz"]
//! irregular = ["dun no"]
//! ```

use crate::errors::{ConfigError, ConfigResult};
use crate::tokenizer::{Granularity, RuleTables, Tokenizer};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for a tokenizer run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenizerConfig {
    #[serde(default)]
    pub granularity: Granularity,
    #[serde(default)]
    pub tables: TableConfig,
}

/// Which built-in tables to start from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableBase {
    #[default]
    Penn,
    Empty,
}

/// Entries added on top of the base tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    #[serde(default)]
    pub base: TableBase,
    /// Surface forms with a space at each split point, e.g. `"wan na"`.
    #[serde(default)]
    pub irregular: Vec<String>,
    #[serde(default)]
    pub suffixes: Vec<String>,
    #[serde(default)]
    pub abbreviations: Vec<String>,
    #[serde(default)]
    pub currency: Vec<String>,
    #[serde(default)]
    pub meridiems: Vec<String>,
}

impl TableConfig {
    pub fn build(&self) -> RuleTables {
        let base = match self.base {
            TableBase::Penn => RuleTables::penn(),
            TableBase::Empty => RuleTables::empty(),
        };
        base.with_irregular(&self.irregular)
            .with_suffixes(&self.suffixes)
            .with_abbreviations(&self.abbreviations)
            .with_currency(&self.currency)
            .with_meridiems(&self.meridiems)
    }

    fn is_stock_penn(&self) -> bool {
        *self == TableConfig::default()
    }
}

impl TokenizerConfig {
    pub fn from_toml_str(input: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            granularity = ?config.granularity,
            "loaded tokenizer configuration"
        );
        Ok(config)
    }

    /// Build the tokenizer described by this configuration.
    pub fn tokenizer(&self) -> Tokenizer {
        if self.tables.is_stock_penn() {
            Tokenizer::new()
        } else {
            Tokenizer::with_tables(self.tables.build())
        }
    }
}
