//! Scripture reference recognition and counting
//!
//! Finds references such as "Genesis 1:1-3", "Psalm 130:4,8" or
//! "Matthew - John" in free text, turns them into validated
//! [`NormalizedReference`] values, and counts the books, chapters and verses
//! they span.
//!
//! ```text
//! text -> scanner -> RawReferenceToken -> normalizer -> NormalizedReference -> aggregate -> counts
//!                                            |
//!                                  alias table + canon
//! ```
//!
//! The canon and alias table are immutable and shared through `Arc`; a
//! [`ReferenceService`] binds one of each. The free functions below use the
//! standard 66-book canon with the embedded default alias set.
//!
//! ```
//! use scripture_refs::{count_chapters, get_references};
//!
//! let found = get_references("Genesis has 50 chapters, but Exodus has 40.");
//! assert_eq!(found.references.len(), 2);
//! assert_eq!(count_chapters(&found.references), Ok(90));
//! ```

pub mod aggregate;
pub mod alias;
pub mod canon;
pub mod error;
pub mod normalizer;
pub mod reference;
pub mod scanner;
pub mod service;

pub use aggregate::{Aggregator, ReferenceSet};
pub use alias::{AliasKind, AliasTable};
pub use canon::{Book, Canon, VerseId};
pub use error::{ReferenceError, ReferenceResult};
pub use normalizer::Normalizer;
pub use reference::NormalizedReference;
pub use service::{Extraction, ReferenceService, Rejection};

/// References in `text`, normalized against the standard canon
pub fn get_references(text: &str) -> Extraction {
    ReferenceService::standard().get_references(text)
}

/// Books spanned by each reference, summed over one reference or a sequence
pub fn count_books<R: ReferenceSet + ?Sized>(refs: &R) -> ReferenceResult<u64> {
    ReferenceService::standard().count_books(refs)
}

/// Chapters spanned, summed without deduplication
pub fn count_chapters<R: ReferenceSet + ?Sized>(refs: &R) -> ReferenceResult<u64> {
    ReferenceService::standard().count_chapters(refs)
}

/// Verses spanned, summed without deduplication
pub fn count_verses<R: ReferenceSet + ?Sized>(refs: &R) -> ReferenceResult<u64> {
    ReferenceService::standard().count_verses(refs)
}
