//! Canonical reference values
//!
//! A `NormalizedReference` is an inclusive span from a start verse to an end
//! verse, possibly crossing into a later book. Values built through the
//! constructors here or by the normalizer are valid for the canon they were
//! built against; hand-built values can be checked with `validate`.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::canon::{Book, Canon};
use crate::error::{RangeViolation, ReferenceError, ReferenceResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedReference {
    pub book: Book,
    pub start_chapter: u16,
    pub start_verse: u16,
    /// Relative to `end_book` when present, else `book`
    pub end_chapter: u16,
    pub end_verse: u16,
    /// Set only when the span crosses into a later book
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_book: Option<Book>,
}

impl NormalizedReference {
    /// Single-book span, unchecked
    pub fn new(book: Book, start: (u16, u16), end: (u16, u16)) -> Self {
        Self {
            book,
            start_chapter: start.0,
            start_verse: start.1,
            end_chapter: end.0,
            end_verse: end.1,
            end_book: None,
        }
    }

    /// Cross-book span, unchecked
    pub fn cross_book(book: Book, start: (u16, u16), end_book: Book, end: (u16, u16)) -> Self {
        Self {
            end_book: Some(end_book),
            ..Self::new(book, start, end)
        }
    }

    pub fn whole_book(canon: &Canon, book: Book) -> ReferenceResult<Self> {
        Ok(Self::new(book, (1, 1), canon.last_verse(book)?))
    }

    pub fn whole_chapter(canon: &Canon, book: Book, chapter: u16) -> ReferenceResult<Self> {
        canon.check_chapter(book, chapter)?;
        let last = canon.verse_count(book, chapter)?;
        Ok(Self::new(book, (chapter, 1), (chapter, last)))
    }

    pub fn verse(canon: &Canon, book: Book, chapter: u16, verse: u16) -> ReferenceResult<Self> {
        canon.check_verse(book, chapter, verse)?;
        Ok(Self::new(book, (chapter, verse), (chapter, verse)))
    }

    /// Every verse from the first book through the last
    pub fn books(canon: &Canon, first: Book, last: Book) -> ReferenceResult<Self> {
        if first == last {
            return Self::whole_book(canon, first);
        }
        let reference = Self::cross_book(first, (1, 1), last, canon.last_verse(last)?);
        reference.validate(canon)?;
        Ok(reference)
    }

    /// Book holding the end position
    pub fn last_book(&self) -> Book {
        self.end_book.unwrap_or(self.book)
    }

    pub fn is_cross_book(&self) -> bool {
        self.end_book.is_some()
    }

    pub fn start(&self) -> (u16, u16) {
        (self.start_chapter, self.start_verse)
    }

    pub fn end(&self) -> (u16, u16) {
        (self.end_chapter, self.end_verse)
    }

    /// Check every bound and the ordering of the span against `canon`
    pub fn validate(&self, canon: &Canon) -> ReferenceResult<()> {
        canon.check_verse(self.book, self.start_chapter, self.start_verse)?;
        canon.check_verse(self.last_book(), self.end_chapter, self.end_verse)?;

        match self.end_book {
            Some(end_book) if canon.compare(self.book, end_book)? != Ordering::Less => {
                Err(self.invalid_range(RangeViolation::EndBookNotAfterStart))
            }
            None if self.end() < self.start() => {
                Err(self.invalid_range(RangeViolation::EndBeforeStart))
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn invalid_range(&self, reason: RangeViolation) -> ReferenceError {
        ReferenceError::InvalidRange {
            start: format!("{} {}:{}", self.book, self.start_chapter, self.start_verse),
            end: format!(
                "{} {}:{}",
                self.last_book(),
                self.end_chapter,
                self.end_verse
            ),
            reason,
        }
    }

    /// Shortest text that scans back to this reference.
    ///
    /// Whole books render as the book title, whole chapters as chapter
    /// numbers, everything else with explicit verses:
    /// "Genesis", "Genesis 1-3", "Genesis 1:1-3", "Matthew - John".
    pub fn render(&self, canon: &Canon) -> ReferenceResult<String> {
        if let Some(end_book) = self.end_book {
            let start = if self.start() == (1, 1) {
                self.book.to_string()
            } else {
                format!("{} {}:{}", self.book, self.start_chapter, self.start_verse)
            };
            let end = if self.end() == canon.last_verse(end_book)? {
                end_book.to_string()
            } else {
                format!("{} {}:{}", end_book, self.end_chapter, self.end_verse)
            };
            return Ok(format!("{} - {}", start, end));
        }

        if self.start() == (1, 1) && self.end() == canon.last_verse(self.book)? {
            return Ok(self.book.to_string());
        }

        let whole_chapters = self.start_verse == 1
            && self.end_verse == canon.verse_count(self.book, self.end_chapter)?;
        let text = match (whole_chapters, self.start_chapter == self.end_chapter) {
            (true, true) => format!("{} {}", self.book, self.start_chapter),
            (true, false) => format!(
                "{} {}-{}",
                self.book, self.start_chapter, self.end_chapter
            ),
            (false, true) if self.start_verse == self.end_verse => format!(
                "{} {}:{}",
                self.book, self.start_chapter, self.start_verse
            ),
            (false, true) => format!(
                "{} {}:{}-{}",
                self.book, self.start_chapter, self.start_verse, self.end_verse
            ),
            (false, false) => self.to_string(),
        };
        Ok(text)
    }
}

/// Explicit form: every position spelled out as chapter:verse
impl fmt::Display for NormalizedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.start_chapter, self.start_verse)?;
        match self.end_book {
            Some(end_book) => write!(
                f,
                " - {} {}:{}",
                end_book, self.end_chapter, self.end_verse
            ),
            None if self.start() == self.end() => Ok(()),
            None if self.start_chapter == self.end_chapter => write!(f, "-{}", self.end_verse),
            None => write!(f, "-{}:{}", self.end_chapter, self.end_verse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Bound;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_constructors() {
        let canon = Canon::standard();
        assert_eq!(
            NormalizedReference::whole_book(&canon, Book::Genesis).unwrap(),
            NormalizedReference::new(Book::Genesis, (1, 1), (50, 26))
        );
        assert_eq!(
            NormalizedReference::whole_chapter(&canon, Book::Psalms, 117).unwrap(),
            NormalizedReference::new(Book::Psalms, (117, 1), (117, 2))
        );
        assert_eq!(
            NormalizedReference::books(&canon, Book::Matthew, Book::John).unwrap(),
            NormalizedReference::cross_book(Book::Matthew, (1, 1), Book::John, (21, 25))
        );
        assert!(NormalizedReference::books(&canon, Book::John, Book::Matthew).is_err());
        assert!(NormalizedReference::whole_chapter(&canon, Book::Genesis, 51).is_err());
    }

    #[test]
    fn test_validate_boundaries() {
        let canon = Canon::standard();
        // Last verse of the last chapter is valid
        assert_eq!(
            NormalizedReference::new(Book::Revelation, (22, 21), (22, 21)).validate(&canon),
            Ok(())
        );

        let past_end = NormalizedReference::new(Book::Genesis, (51, 1), (51, 1));
        assert_eq!(
            past_end.validate(&canon),
            Err(ReferenceError::InvalidReference {
                book: Book::Genesis,
                bound: Bound::Chapter {
                    chapter: 51,
                    max: 50
                },
            })
        );
    }

    #[test]
    fn test_validate_ordering() {
        let canon = Canon::standard();
        let backwards = NormalizedReference::new(Book::Genesis, (2, 1), (1, 5));
        assert!(matches!(
            backwards.validate(&canon),
            Err(ReferenceError::InvalidRange {
                reason: RangeViolation::EndBeforeStart,
                ..
            })
        ));

        let same_book = NormalizedReference::cross_book(Book::Genesis, (1, 1), Book::Genesis, (2, 1));
        assert!(matches!(
            same_book.validate(&canon),
            Err(ReferenceError::InvalidRange {
                reason: RangeViolation::EndBookNotAfterStart,
                ..
            })
        ));

        let tobit = NormalizedReference::new(Book::Tobit, (1, 1), (1, 1));
        assert!(matches!(
            tobit.validate(&canon),
            Err(ReferenceError::OutOfCanon { .. })
        ));
        assert_eq!(tobit.validate(&Canon::extended()), Ok(()));
    }

    #[test]
    fn test_display_is_explicit() {
        let canon = Canon::standard();
        let genesis = NormalizedReference::whole_book(&canon, Book::Genesis).unwrap();
        assert_eq!(genesis.to_string(), "Genesis 1:1-50:26");
        assert_eq!(
            NormalizedReference::new(Book::John, (3, 16), (3, 16)).to_string(),
            "John 3:16"
        );
        assert_eq!(
            NormalizedReference::new(Book::Luke, (3, 5), (3, 7)).to_string(),
            "Luke 3:5-7"
        );
        assert_eq!(
            NormalizedReference::books(&canon, Book::Matthew, Book::John)
                .unwrap()
                .to_string(),
            "Matthew 1:1 - John 21:25"
        );
    }

    #[test]
    fn test_render_is_compact() {
        let canon = Canon::standard();
        let render = |r: NormalizedReference| r.render(&canon).unwrap();

        assert_eq!(render(NormalizedReference::whole_book(&canon, Book::Genesis).unwrap()), "Genesis");
        assert_eq!(render(NormalizedReference::whole_chapter(&canon, Book::Genesis, 1).unwrap()), "Genesis 1");
        assert_eq!(render(NormalizedReference::new(Book::Genesis, (1, 1), (3, 24))), "Genesis 1-3");
        assert_eq!(render(NormalizedReference::new(Book::Genesis, (1, 1), (1, 3))), "Genesis 1:1-3");
        assert_eq!(render(NormalizedReference::new(Book::Genesis, (1, 1), (2, 3))), "Genesis 1:1-2:3");
        assert_eq!(render(NormalizedReference::new(Book::Jude, (1, 1), (1, 25))), "Jude");
        assert_eq!(
            render(NormalizedReference::books(&canon, Book::Matthew, Book::John).unwrap()),
            "Matthew - John"
        );
        assert_eq!(
            render(NormalizedReference::cross_book(Book::Matthew, (5, 1), Book::John, (21, 25))),
            "Matthew 5:1 - John"
        );
    }

    #[test]
    fn test_serde_shape() {
        let reference = NormalizedReference::new(Book::SongOfSongs, (2, 1), (2, 4));
        let json = serde_json::to_value(reference).unwrap();
        assert_eq!(json["book"], "song_of_songs");
        assert!(json.get("end_book").is_none());
        let back: NormalizedReference = serde_json::from_value(json).unwrap();
        assert_eq!(back, reference);
    }
}
