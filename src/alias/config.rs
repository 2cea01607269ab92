//! Alias set configuration types
//!
//! An alias set is a YAML document listing names, variants and abbreviations
//! per book plus a precedence map for aliases shared by several books. The
//! default set is embedded at compile time from `config/aliases.yaml`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::canon::Book;
use crate::error::AliasConfigError;

/// The embedded default alias set
pub(crate) const EMBEDDED_ALIASES: &str = include_str!("../../config/aliases.yaml");

/// Top-level alias set document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AliasConfig {
    /// Alias set name (e.g. "default")
    pub name: String,

    /// Per-book aliases, keyed by snake_case book name
    #[serde(default)]
    pub books: BTreeMap<Book, BookAliases>,

    /// Alias text -> preferred book when the alias is declared more than once
    #[serde(default)]
    pub precedence: BTreeMap<String, Book>,
}

/// Aliases declared for one book. The book title is always implied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookAliases {
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub abbreviations: Vec<String>,
}

impl AliasConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, AliasConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// The embedded default alias set
    pub fn embedded() -> Result<Self, AliasConfigError> {
        Self::from_yaml_str(EMBEDDED_ALIASES)
    }
}
