//! Alias resolution: free text tokens to canonical books
//!
//! The `AliasTable` maps normalized alias text to candidate books. It is
//! built once from an alias set (see [`config`]) and is read-only afterwards.
//!
//! ## Precedence
//!
//! When one normalized alias belongs to several books, candidates are ordered:
//! 1. The book named for that alias in the set's `precedence` map
//! 2. Alias kind: names, then variants, then abbreviations
//! 3. Canonical book order
//!
//! `resolve` returns the first candidate, so results never depend on the
//! order in which text is scanned.

pub mod config;
pub mod normalize;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::canon::Book;
use crate::error::AliasConfigError;

pub use config::{AliasConfig, BookAliases};
pub use normalize::normalize_alias;

/// Environment variable naming an alternate alias set file
pub const ALIASES_ENV: &str = "SCRIPTURE_ALIASES";

static EMBEDDED: Lazy<Arc<AliasTable>> = Lazy::new(|| {
    match AliasConfig::embedded().and_then(|config| AliasTable::from_config(&config)) {
        Ok(table) => Arc::new(table),
        Err(e) => {
            tracing::error!(error = %e, "embedded alias set is invalid, using titles only");
            Arc::new(AliasTable::titles_only())
        }
    }
});

/// How an alias was declared; lower kinds take precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasKind {
    /// The book title or another full name
    Name,
    /// Alternate long form ("Psalm", "Song of Solomon")
    Variant,
    /// Short form ("Gen", "1 Jn")
    Abbreviation,
}

impl AliasKind {
    /// Names and variants can stand alone as a whole-book mention
    pub fn is_full_name(self) -> bool {
        !matches!(self, Self::Abbreviation)
    }
}

/// A candidate book for an alias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AliasMatch {
    pub book: Book,
    pub kind: AliasKind,
}

/// Immutable alias lookup table
#[derive(Debug, Clone)]
pub struct AliasTable {
    name: String,

    /// Normalized alias -> candidate books in precedence order
    index: HashMap<String, SmallVec<[AliasMatch; 4]>>,

    /// Longest alias measured in words; bounds scanner n-grams
    max_words: usize,
}

impl AliasTable {
    fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: HashMap::new(),
            max_words: 1,
        }
    }

    /// The embedded default alias set, built once per process
    pub fn embedded() -> Arc<AliasTable> {
        Arc::clone(&EMBEDDED)
    }

    /// A table holding only the book titles
    pub fn titles_only() -> Self {
        let mut table = Self::empty("titles");
        for book in Book::ALL {
            table.insert_key(normalize_alias(book.title()), book, AliasKind::Name);
        }
        table
    }

    /// Build a table from an alias set
    pub fn from_config(config: &AliasConfig) -> Result<Self, AliasConfigError> {
        let mut table = Self::titles_only();
        table.name = config.name.clone();

        for (book, aliases) in &config.books {
            let declared = [
                (&aliases.names, AliasKind::Name),
                (&aliases.variants, AliasKind::Variant),
                (&aliases.abbreviations, AliasKind::Abbreviation),
            ];
            for (texts, kind) in declared {
                for text in texts {
                    table.insert(text, *book, kind)?;
                }
            }
        }

        let mut preferred: HashMap<String, Book> = HashMap::new();
        for (alias, book) in &config.precedence {
            let key = normalize_alias(alias);
            let candidates =
                table
                    .index
                    .get(&key)
                    .ok_or_else(|| AliasConfigError::UnknownPrecedence {
                        alias: alias.clone(),
                    })?;
            if !candidates.iter().any(|m| m.book == *book) {
                return Err(AliasConfigError::PrecedenceMismatch {
                    alias: alias.clone(),
                    book: *book,
                });
            }
            preferred.insert(key, *book);
        }

        for (key, candidates) in table.index.iter_mut() {
            let first = preferred.get(key).copied();
            candidates.sort_by_key(|m| (Some(m.book) != first, m.kind, m.book));
            if candidates.len() > 1 {
                tracing::trace!(
                    alias = %key,
                    winner = %candidates[0].book,
                    candidates = candidates.len(),
                    "alias collision resolved by precedence"
                );
            }
        }

        tracing::info!(
            alias_set = %table.name,
            aliases = table.index.len(),
            "alias table built"
        );
        Ok(table)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, AliasConfigError> {
        Self::from_config(&AliasConfig::from_yaml_str(yaml)?)
    }

    /// Load an alias set from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read alias set from {}", path.display()))?;
        let table = Self::from_yaml_str(&yaml)
            .with_context(|| format!("Invalid alias set in {}", path.display()))?;
        Ok(table)
    }

    /// Alias set from `SCRIPTURE_ALIASES` when set, else the embedded set
    pub fn from_env() -> anyhow::Result<Arc<Self>> {
        match std::env::var_os(ALIASES_ENV) {
            Some(path) => {
                let path = Path::new(&path);
                tracing::info!(path = %path.display(), "loading alias set from environment");
                Ok(Arc::new(Self::load(path)?))
            }
            None => Ok(Self::embedded()),
        }
    }

    fn insert(&mut self, text: &str, book: Book, kind: AliasKind) -> Result<(), AliasConfigError> {
        let key = normalize_alias(text);
        if key.is_empty() {
            return Err(AliasConfigError::EmptyAlias {
                alias: text.to_string(),
                book,
            });
        }
        self.insert_key(key, book, kind);
        Ok(())
    }

    fn insert_key(&mut self, key: String, book: Book, kind: AliasKind) {
        self.max_words = self.max_words.max(key.split(' ').count());
        let candidates = self.index.entry(key).or_default();
        match candidates.iter_mut().find(|m| m.book == book) {
            Some(existing) => existing.kind = existing.kind.min(kind),
            None => candidates.push(AliasMatch { book, kind }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Longest alias in words
    pub fn max_words(&self) -> usize {
        self.max_words
    }

    /// Resolve free text to a book; `None` means "not a reference"
    pub fn resolve(&self, token: &str) -> Option<Book> {
        self.lookup(token).map(|m| m.book)
    }

    /// Preferred match for free text, with the alias kind that matched
    pub fn lookup(&self, token: &str) -> Option<AliasMatch> {
        self.lookup_normalized(&normalize_alias(token))
    }

    /// Preferred match for an already normalized key
    pub fn lookup_normalized(&self, key: &str) -> Option<AliasMatch> {
        self.index.get(key).and_then(|c| c.first()).copied()
    }

    /// Every candidate for free text, in precedence order
    pub fn candidates(&self, token: &str) -> &[AliasMatch] {
        self.index
            .get(&normalize_alias(token))
            .map(|c| c.as_slice())
            .unwrap_or(&[])
    }

    /// Aliases shared by more than one book, sorted by alias
    pub fn collisions(&self) -> Vec<(&str, &[AliasMatch])> {
        let mut shared: Vec<(&str, &[AliasMatch])> = self
            .index
            .iter()
            .filter(|(_, c)| c.len() > 1)
            .map(|(k, c)| (k.as_str(), c.as_slice()))
            .collect();
        shared.sort_by_key(|(k, _)| *k);
        shared
    }

    /// Statistics for debugging
    pub fn stats(&self) -> AliasTableStats {
        AliasTableStats {
            name: self.name.clone(),
            alias_count: self.index.len(),
            collision_count: self.index.values().filter(|c| c.len() > 1).count(),
            max_words: self.max_words,
        }
    }
}

/// Alias table statistics
#[derive(Debug, Clone)]
pub struct AliasTableStats {
    pub name: String,
    pub alias_count: usize,
    pub collision_count: usize,
    pub max_words: usize,
}

impl fmt::Display for AliasTableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Alias Table Statistics:")?;
        writeln!(f, "  Alias set: {}", self.name)?;
        writeln!(f, "  Aliases: {}", self.alias_count)?;
        writeln!(f, "  Collisions: {}", self.collision_count)?;
        writeln!(f, "  Longest alias (words): {}", self.max_words)?;
        Ok(())
    }
}
