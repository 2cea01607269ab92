//! Book, chapter and verse counts over normalized references
//!
//! Counts walk each reference through the canon chapter by chapter and are
//! summed across the input without deduplication: overlapping or repeated
//! references each contribute their own count.
//!
//! References are not re-validated up front, but every position is looked
//! up in the canon before it is counted, so a hand-built value outside the
//! canon fails with `OutOfCanon` rather than producing a wrong total.

use crate::canon::{Book, Canon, CanonEntry, VerseId};
use crate::error::{RangeViolation, ReferenceResult};
use crate::reference::NormalizedReference;

/// Input accepted by the counting operations: one reference or a sequence
pub trait ReferenceSet {
    fn references(&self) -> &[NormalizedReference];
}

impl ReferenceSet for NormalizedReference {
    fn references(&self) -> &[NormalizedReference] {
        std::slice::from_ref(self)
    }
}

impl ReferenceSet for [NormalizedReference] {
    fn references(&self) -> &[NormalizedReference] {
        self
    }
}

impl<const N: usize> ReferenceSet for [NormalizedReference; N] {
    fn references(&self) -> &[NormalizedReference] {
        self
    }
}

impl ReferenceSet for Vec<NormalizedReference> {
    fn references(&self) -> &[NormalizedReference] {
        self
    }
}

impl<T: ReferenceSet + ?Sized> ReferenceSet for &T {
    fn references(&self) -> &[NormalizedReference] {
        (**self).references()
    }
}

/// One chapter touched by a reference, with the verses it includes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterSpan {
    pub book: Book,
    pub chapter: u16,
    pub first_verse: u16,
    pub last_verse: u16,
}

impl ChapterSpan {
    pub fn verse_count(&self) -> u64 {
        u64::from(self.last_verse - self.first_verse + 1)
    }
}

pub struct Aggregator<'c> {
    canon: &'c Canon,
}

impl<'c> Aggregator<'c> {
    pub fn new(canon: &'c Canon) -> Self {
        Self { canon }
    }

    /// Distinct books per reference, summed
    pub fn count_books<R: ReferenceSet + ?Sized>(&self, refs: &R) -> ReferenceResult<u64> {
        refs.references().iter().try_fold(0u64, |total, r| {
            Ok(total + self.books_spanned(r)?.len() as u64)
        })
    }

    /// Chapters touched per reference, summed
    pub fn count_chapters<R: ReferenceSet + ?Sized>(&self, refs: &R) -> ReferenceResult<u64> {
        refs.references().iter().try_fold(0u64, |total, r| {
            Ok(total + self.chapters(r)?.len() as u64)
        })
    }

    /// Verses included per reference, summed
    pub fn count_verses<R: ReferenceSet + ?Sized>(&self, refs: &R) -> ReferenceResult<u64> {
        refs.references().iter().try_fold(0u64, |total, r| {
            let verses: u64 = self.chapters(r)?.iter().map(ChapterSpan::verse_count).sum();
            Ok(total + verses)
        })
    }

    /// Every verse of every reference, in input order
    pub fn verse_ids<R: ReferenceSet + ?Sized>(&self, refs: &R) -> ReferenceResult<Vec<VerseId>> {
        let mut ids = Vec::new();
        for reference in refs.references() {
            for span in self.chapters(reference)? {
                ids.extend(
                    (span.first_verse..=span.last_verse)
                        .map(|verse| VerseId::new(span.book, span.chapter, verse)),
                );
            }
        }
        Ok(ids)
    }

    /// Chapters a reference touches, first to last
    pub fn chapters(&self, reference: &NormalizedReference) -> ReferenceResult<Vec<ChapterSpan>> {
        let entries = self.books_spanned(reference)?;
        let last_idx = entries.len() - 1;
        let mut spans = Vec::new();

        for (idx, entry) in entries.iter().enumerate() {
            let first_chapter = if idx == 0 { reference.start_chapter } else { 1 };
            let last_chapter = if idx == last_idx {
                reference.end_chapter
            } else {
                entry.chapter_count()
            };

            for chapter in first_chapter..=last_chapter {
                let verses = self.canon.verse_count(entry.book(), chapter)?;
                let opens = idx == 0 && chapter == reference.start_chapter;
                let closes = idx == last_idx && chapter == reference.end_chapter;
                spans.push(ChapterSpan {
                    book: entry.book(),
                    chapter,
                    first_verse: if opens { reference.start_verse } else { 1 },
                    last_verse: if closes { reference.end_verse } else { verses },
                });
            }
        }

        Ok(spans)
    }

    /// Canon entries from the start book through the end book.
    ///
    /// Checks both endpoints against the canon and that the span moves
    /// forward; never returns an empty slice.
    fn books_spanned(&self, reference: &NormalizedReference) -> ReferenceResult<&'c [CanonEntry]> {
        let last_book = reference.last_book();
        let start = self.canon.verse_id(
            reference.book,
            reference.start_chapter,
            reference.start_verse,
        )?;
        let end = self
            .canon
            .verse_id(last_book, reference.end_chapter, reference.end_verse)?;

        let entries = self.canon.span(reference.book, last_book)?;
        if end < start || entries.is_empty() {
            let reason = if last_book == reference.book {
                RangeViolation::EndBeforeStart
            } else {
                RangeViolation::EndBookNotAfterStart
            };
            return Err(reference.invalid_range(reason));
        }
        Ok(entries)
    }
}
