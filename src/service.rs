//! Reference service: scanning, normalization and counting over one canon
//!
//! `ReferenceService` binds a canon and an alias table and exposes the
//! public operations. Cloning is cheap: both tables are shared via `Arc`.

use std::ops::Range;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::aggregate::{Aggregator, ReferenceSet};
use crate::alias::AliasTable;
use crate::canon::Canon;
use crate::error::{ReferenceError, ReferenceResult};
use crate::normalizer::Normalizer;
use crate::reference::NormalizedReference;
use crate::scanner::{RawReferenceToken, Scanner};

/// A recognized mention that failed normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Byte range of the mention in the scanned text
    pub span: Range<usize>,
    pub text: String,
    pub error: ReferenceError,
}

/// Result of `get_references`: normalized references in text order, plus
/// the mentions that named a known book but could not be normalized.
///
/// Mentions of books the canon does not contain are dropped, not rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub references: Vec<NormalizedReference>,
    pub rejections: Vec<Rejection>,
}

impl Extraction {
    pub fn is_clean(&self) -> bool {
        self.rejections.is_empty()
    }

    /// The references, or the first rejection's error
    pub fn into_result(self) -> ReferenceResult<Vec<NormalizedReference>> {
        match self.rejections.into_iter().next() {
            Some(rejection) => Err(rejection.error),
            None => Ok(self.references),
        }
    }
}

impl ReferenceSet for Extraction {
    fn references(&self) -> &[NormalizedReference] {
        &self.references
    }
}

#[derive(Debug, Clone)]
pub struct ReferenceService {
    canon: Arc<Canon>,
    aliases: Arc<AliasTable>,
}

impl Default for ReferenceService {
    fn default() -> Self {
        Self::standard()
    }
}

impl ReferenceService {
    pub fn new(canon: Arc<Canon>, aliases: Arc<AliasTable>) -> Self {
        Self { canon, aliases }
    }

    /// Standard canon with the embedded default alias set
    pub fn standard() -> Self {
        Self::new(Canon::standard(), AliasTable::embedded())
    }

    /// Extended canon with the embedded default alias set
    pub fn extended() -> Self {
        Self::new(Canon::extended(), AliasTable::embedded())
    }

    /// Standard canon with the alias set named by `SCRIPTURE_ALIASES`, if set
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(Canon::standard(), AliasTable::from_env()?))
    }

    pub fn canon(&self) -> &Canon {
        &self.canon
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn scan<'t>(&self, text: &'t str) -> Scanner<'t, '_> {
        Scanner::new(text, &self.aliases)
    }

    pub fn normalizer(&self) -> Normalizer<'_> {
        Normalizer::new(&self.canon, &self.aliases)
    }

    pub fn aggregator(&self) -> Aggregator<'_> {
        Aggregator::new(&self.canon)
    }

    pub fn normalize(&self, token: &RawReferenceToken<'_>) -> ReferenceResult<NormalizedReference> {
        self.normalizer().normalize(token)
    }

    /// Scan and normalize every reference in `text`.
    ///
    /// Never fails: unrecognized books are dropped and every other failure is
    /// collected as a `Rejection` alongside the successful references.
    pub fn get_references(&self, text: &str) -> Extraction {
        let normalizer = self.normalizer();
        let mut extraction = Extraction::default();

        for token in self.scan(text) {
            match normalizer.normalize(&token) {
                Ok(reference) => extraction.references.push(reference),
                Err(e) if e.is_recoverable() => {
                    tracing::trace!(text = token.text, "mention outside canon dropped");
                }
                Err(e) => {
                    tracing::debug!(
                        text = token.text,
                        offset = token.span.start,
                        error = %e,
                        "reference rejected"
                    );
                    extraction.rejections.push(Rejection {
                        span: token.span.clone(),
                        text: token.text.to_string(),
                        error: e,
                    });
                }
            }
        }

        extraction
    }

    pub fn count_books<R: ReferenceSet + ?Sized>(&self, refs: &R) -> ReferenceResult<u64> {
        self.aggregator().count_books(refs)
    }

    pub fn count_chapters<R: ReferenceSet + ?Sized>(&self, refs: &R) -> ReferenceResult<u64> {
        self.aggregator().count_chapters(refs)
    }

    pub fn count_verses<R: ReferenceSet + ?Sized>(&self, refs: &R) -> ReferenceResult<u64> {
        self.aggregator().count_verses(refs)
    }

    /// Count books mentioned in free text; fails on the first rejected mention
    pub fn count_books_in_text(&self, text: &str) -> ReferenceResult<u64> {
        self.count_books(&self.get_references(text).into_result()?)
    }

    pub fn count_chapters_in_text(&self, text: &str) -> ReferenceResult<u64> {
        self.count_chapters(&self.get_references(text).into_result()?)
    }

    pub fn count_verses_in_text(&self, text: &str) -> ReferenceResult<u64> {
        self.count_verses(&self.get_references(text).into_result()?)
    }

    /// Compact text for a list of references, joined with "; "
    pub fn format<R: ReferenceSet + ?Sized>(&self, refs: &R) -> ReferenceResult<String> {
        let rendered = refs
            .references()
            .iter()
            .map(|r| r.render(&self.canon))
            .collect::<ReferenceResult<Vec<_>>>()?;
        Ok(rendered.join("; "))
    }
}
