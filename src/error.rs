//! Errors for reference recognition and counting
//!
//! `ReferenceError` is what normalization, canon lookups and aggregation
//! return; its payloads name the book and the violated bound so a caller can
//! report a rejection without re-parsing the text. Only `UnrecognizedBook`
//! is recoverable. `AliasConfigError` covers building an alias set.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::canon::Book;

/// Main error type for normalization, canon lookups and aggregation
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceError {
    /// Alias text has no canonical match. Recoverable: scanners skip it.
    #[error("Unrecognized book '{text}'")]
    UnrecognizedBook { text: String },

    /// A chapter or verse number exceeds the canon's bound for its book.
    #[error("Invalid reference to {book}: {bound}")]
    InvalidReference { book: Book, bound: Bound },

    /// The end of a span precedes its start, or a cross-book range does not
    /// move forward in canonical order.
    #[error("Invalid range {start} to {end}: {reason}")]
    InvalidRange {
        start: String,
        end: String,
        reason: RangeViolation,
    },

    /// A lookup reached a book, chapter or verse the canon does not contain.
    #[error("{lookup} is outside the {canon} canon")]
    OutOfCanon { lookup: CanonLookup, canon: String },

    /// A numeric fragment could not be represented as a chapter or verse.
    #[error("Malformed number '{text}'")]
    MalformedNumber { text: String },
}

impl ReferenceError {
    /// Unrecognized books are the only error a scanning caller may drop.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnrecognizedBook { .. })
    }
}

/// Which structural bound an `InvalidReference` violated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bound {
    /// Chapter is zero or greater than the book's chapter count
    Chapter { chapter: u16, max: u16 },
    /// Verse is zero or greater than the chapter's verse count
    Verse { chapter: u16, verse: u16, max: u16 },
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Chapter { chapter, max } => {
                write!(f, "chapter {} is not in 1-{}", chapter, max)
            }
            Bound::Verse {
                chapter,
                verse,
                max,
            } => write!(
                f,
                "verse {} of chapter {} is not in 1-{}",
                verse, chapter, max
            ),
        }
    }
}

/// Why a range was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeViolation {
    /// End position precedes the start position
    EndBeforeStart,
    /// Cross-book range whose end book is not after the start book
    EndBookNotAfterStart,
}

impl fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndBeforeStart => write!(f, "end precedes start"),
            Self::EndBookNotAfterStart => {
                write!(f, "end book must come after the start book")
            }
        }
    }
}

/// The canon lookup that failed with `OutOfCanon`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanonLookup {
    /// Raw book identifier outside the enumeration
    BookId(u8),
    /// Book the canon does not include
    Book(Book),
    Chapter {
        book: Book,
        chapter: u16,
    },
    Verse {
        book: Book,
        chapter: u16,
        verse: u16,
    },
}

impl fmt::Display for CanonLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BookId(id) => write!(f, "book #{}", id),
            Self::Book(book) => write!(f, "{}", book),
            Self::Chapter { book, chapter } => write!(f, "{} {}", book, chapter),
            Self::Verse {
                book,
                chapter,
                verse,
            } => write!(f, "{} {}:{}", book, chapter, verse),
        }
    }
}

/// Errors raised while building an alias table from YAML configuration
#[derive(Error, Debug)]
pub enum AliasConfigError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Alias '{alias}' for {book} normalizes to an empty key")]
    EmptyAlias { alias: String, book: Book },

    #[error("Precedence entry '{alias}' names {book}, which does not declare that alias")]
    PrecedenceMismatch { alias: String, book: Book },

    #[error("Precedence entry '{alias}' does not match any declared alias")]
    UnknownPrecedence { alias: String },
}

pub type ReferenceResult<T> = Result<T, ReferenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_messages() {
        let err = ReferenceError::InvalidReference {
            book: Book::Psalms,
            bound: Bound::Chapter {
                chapter: 151,
                max: 150,
            },
        };
        assert_eq!(
            err.to_string(),
            "Invalid reference to Psalms: chapter 151 is not in 1-150"
        );

        let err = ReferenceError::InvalidReference {
            book: Book::Genesis,
            bound: Bound::Verse {
                chapter: 1,
                verse: 32,
                max: 31,
            },
        };
        assert_eq!(
            err.to_string(),
            "Invalid reference to Genesis: verse 32 of chapter 1 is not in 1-31"
        );
    }

    #[test]
    fn test_out_of_canon_message() {
        let err = ReferenceError::OutOfCanon {
            lookup: CanonLookup::Book(Book::Tobit),
            canon: "protestant".to_string(),
        };
        assert_eq!(err.to_string(), "Tobit is outside the protestant canon");
    }

    #[test]
    fn test_only_unrecognized_is_recoverable() {
        assert!(ReferenceError::UnrecognizedBook {
            text: "Hezekiah".to_string()
        }
        .is_recoverable());
        assert!(!ReferenceError::MalformedNumber {
            text: "x".to_string()
        }
        .is_recoverable());
    }
}
