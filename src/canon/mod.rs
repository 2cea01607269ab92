//! Canon table: ordered books with their chapter and verse structure
//!
//! A `Canon` is an immutable, flat table indexed by canonical book order and
//! chapter number. The two built-in canons are built once per process and
//! shared via `Arc<Canon>`; alternate canons can be assembled from any subset
//! of the enumerated books.
//!
//! All lookups are pure and fail with `OutOfCanon` when they reach a book,
//! chapter or verse the table does not contain.

pub mod book;
mod data;

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub use book::Book;

use crate::error::{Bound, CanonLookup, ReferenceError, ReferenceResult};

/// Multiplier applied to the book id inside a `VerseId`
pub const BOOK_PLACE: u32 = 1_000_000;

/// Multiplier applied to the chapter number inside a `VerseId`
pub const CHAPTER_PLACE: u32 = 1_000;

static STANDARD: Lazy<Arc<Canon>> = Lazy::new(|| {
    Arc::new(Canon::from_books(
        "protestant",
        Book::ALL.into_iter().filter(|b| !b.is_deuterocanonical()),
    ))
});

static EXTENDED: Lazy<Arc<Canon>> =
    Lazy::new(|| Arc::new(Canon::from_books("extended", Book::ALL)));

/// Packed verse identifier: `book * 1_000_000 + chapter * 1_000 + verse`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VerseId(pub u32);

impl VerseId {
    /// Pack a position without checking it against any canon
    pub fn new(book: Book, chapter: u16, verse: u16) -> Self {
        Self(u32::from(book.id()) * BOOK_PLACE + u32::from(chapter) * CHAPTER_PLACE + u32::from(verse))
    }

    pub fn book_id(self) -> u8 {
        // At most 4294 for any u32; ids above 255 fail in Book::from_id.
        u8::try_from(self.0 / BOOK_PLACE).unwrap_or(u8::MAX)
    }

    pub fn chapter(self) -> u16 {
        ((self.0 % BOOK_PLACE) / CHAPTER_PLACE) as u16
    }

    pub fn verse(self) -> u16 {
        (self.0 % CHAPTER_PLACE) as u16
    }
}

impl fmt::Display for VerseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08}", self.0)
    }
}

/// Structure of one book inside a canon
#[derive(Debug, Clone)]
pub struct CanonEntry {
    book: Book,
    verses: &'static [u16],
}

impl CanonEntry {
    fn new(book: Book) -> Self {
        Self {
            book,
            verses: data::verse_counts(book),
        }
    }

    pub fn book(&self) -> Book {
        self.book
    }

    pub fn chapter_count(&self) -> u16 {
        self.verses.len() as u16
    }

    /// Verse count of a 1-based chapter, `None` when out of range
    pub fn verse_count(&self, chapter: u16) -> Option<u16> {
        chapter
            .checked_sub(1)
            .and_then(|idx| self.verses.get(usize::from(idx)))
            .copied()
    }

    /// Verse counts, index 0 holding chapter 1
    pub fn verse_counts(&self) -> &[u16] {
        self.verses
    }

    pub fn total_verses(&self) -> u32 {
        self.verses.iter().map(|v| u32::from(*v)).sum()
    }
}

/// Ordered set of books with their chapter/verse structure
#[derive(Debug, Clone)]
pub struct Canon {
    name: String,
    entries: Vec<CanonEntry>,
    /// Book id -> index into `entries`
    positions: [Option<usize>; Book::ALL.len() + 1],
}

impl Canon {
    /// The 66-book Protestant canon
    pub fn standard() -> Arc<Canon> {
        Arc::clone(&STANDARD)
    }

    /// The standard canon plus the six enumerated deuterocanonical books
    pub fn extended() -> Arc<Canon> {
        Arc::clone(&EXTENDED)
    }

    /// Build a canon from a set of books.
    ///
    /// Books are kept in canonical order regardless of input order, and
    /// duplicates are dropped.
    pub fn from_books(name: impl Into<String>, books: impl IntoIterator<Item = Book>) -> Self {
        let mut books: Vec<Book> = books.into_iter().collect();
        books.sort();
        books.dedup();

        let mut positions = [None; Book::ALL.len() + 1];
        let entries: Vec<CanonEntry> = books
            .into_iter()
            .enumerate()
            .map(|(idx, book)| {
                positions[usize::from(book.id())] = Some(idx);
                CanonEntry::new(book)
            })
            .collect();

        Self {
            name: name.into(),
            entries,
            positions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Books in canonical order
    pub fn books(&self) -> impl Iterator<Item = Book> + '_ {
        self.entries.iter().map(|e| e.book)
    }

    pub fn entries(&self) -> &[CanonEntry] {
        &self.entries
    }

    pub fn contains(&self, book: Book) -> bool {
        self.positions[usize::from(book.id())].is_some()
    }

    fn out_of_canon(&self, lookup: CanonLookup) -> ReferenceError {
        ReferenceError::OutOfCanon {
            lookup,
            canon: self.name.clone(),
        }
    }

    /// Index of `book` within this canon
    pub fn position(&self, book: Book) -> ReferenceResult<usize> {
        self.positions[usize::from(book.id())]
            .ok_or_else(|| self.out_of_canon(CanonLookup::Book(book)))
    }

    pub fn entry(&self, book: Book) -> ReferenceResult<&CanonEntry> {
        let idx = self.position(book)?;
        Ok(&self.entries[idx])
    }

    pub fn chapter_count(&self, book: Book) -> ReferenceResult<u16> {
        Ok(self.entry(book)?.chapter_count())
    }

    pub fn verse_count(&self, book: Book, chapter: u16) -> ReferenceResult<u16> {
        self.entry(book)?
            .verse_count(chapter)
            .ok_or_else(|| self.out_of_canon(CanonLookup::Chapter { book, chapter }))
    }

    /// Canonical order of two books; both must belong to the canon
    pub fn compare(&self, a: Book, b: Book) -> ReferenceResult<Ordering> {
        Ok(self.position(a)?.cmp(&self.position(b)?))
    }

    /// Entries from `first` through `last` inclusive (empty when reversed)
    pub fn span(&self, first: Book, last: Book) -> ReferenceResult<&[CanonEntry]> {
        let start = self.position(first)?;
        let end = self.position(last)?;
        if start > end {
            return Ok(&[]);
        }
        Ok(&self.entries[start..=end])
    }

    pub fn is_single_chapter(&self, book: Book) -> ReferenceResult<bool> {
        Ok(self.chapter_count(book)? == 1)
    }

    /// `(last chapter, last verse of that chapter)` for a book
    pub fn last_verse(&self, book: Book) -> ReferenceResult<(u16, u16)> {
        let chapter = self.chapter_count(book)?;
        Ok((chapter, self.verse_count(book, chapter)?))
    }

    /// Validate a chapter number, reporting the violated bound.
    pub fn check_chapter(&self, book: Book, chapter: u16) -> ReferenceResult<()> {
        let max = self.chapter_count(book)?;
        if chapter == 0 || chapter > max {
            return Err(ReferenceError::InvalidReference {
                book,
                bound: Bound::Chapter { chapter, max },
            });
        }
        Ok(())
    }

    /// Validate a chapter and verse, reporting the violated bound.
    pub fn check_verse(&self, book: Book, chapter: u16, verse: u16) -> ReferenceResult<()> {
        self.check_chapter(book, chapter)?;
        let max = self.verse_count(book, chapter)?;
        if verse == 0 || verse > max {
            return Err(ReferenceError::InvalidReference {
                book,
                bound: Bound::Verse {
                    chapter,
                    verse,
                    max,
                },
            });
        }
        Ok(())
    }

    pub fn verse_id(&self, book: Book, chapter: u16, verse: u16) -> ReferenceResult<VerseId> {
        let max = self.verse_count(book, chapter)?;
        if verse == 0 || verse > max {
            return Err(self.out_of_canon(CanonLookup::Verse {
                book,
                chapter,
                verse,
            }));
        }
        Ok(VerseId::new(book, chapter, verse))
    }

    /// Decode a `VerseId`, checking it names a verse of this canon
    pub fn locate(&self, id: VerseId) -> ReferenceResult<(Book, u16, u16)> {
        let book = Book::from_id(id.book_id())?;
        let (chapter, verse) = (id.chapter(), id.verse());
        self.verse_id(book, chapter, verse)?;
        Ok((book, chapter, verse))
    }
}
