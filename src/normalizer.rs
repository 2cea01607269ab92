//! Raw reference tokens to validated `NormalizedReference` values
//!
//! Omitted positions are filled from the canon:
//! - book only: chapter 1 verse 1 through the book's last verse
//! - chapter only: the whole chapter
//! - an end without a verse: the last verse of the end chapter
//! - a cross-book start without a verse: verse 1 of its chapter (chapter 1
//!   when the chapter is also omitted)
//!
//! In single-chapter books a chapter-only tail is read as verses of chapter
//! 1 ("Jude 5"), except the bare "Jude 1" which names the whole chapter. The
//! same holds on either side of a cross-book range ("Genesis 1 - Jude 3").

use crate::alias::AliasTable;
use crate::canon::{Book, Canon};
use crate::error::{ReferenceError, ReferenceResult};
use crate::reference::NormalizedReference;
use crate::scanner::{RawPoint, RawReferenceToken};

/// Parsed `(chapter, verse)`, either may be omitted
type Position = (Option<u16>, Option<u16>);

pub struct Normalizer<'a> {
    canon: &'a Canon,
    aliases: &'a AliasTable,
}

impl<'a> Normalizer<'a> {
    pub fn new(canon: &'a Canon, aliases: &'a AliasTable) -> Self {
        Self { canon, aliases }
    }

    /// Resolve, default and validate one scanned token
    pub fn normalize(&self, token: &RawReferenceToken<'_>) -> ReferenceResult<NormalizedReference> {
        let book = self.resolve_book(token.book)?;
        let start = parse_point(token.start)?;
        let end = token.end.map(parse_point).transpose()?;

        let reference = match token.end_book {
            Some(end_text) => {
                let end_book = self.resolve_book(end_text)?;
                self.cross_book(book, start, end_book, end.unwrap_or_default())?
            }
            None => self.single_book(book, start, end)?,
        };

        reference.validate(self.canon)?;
        Ok(reference)
    }

    /// First candidate for the alias that this canon contains
    pub fn resolve_book(&self, text: &str) -> ReferenceResult<Book> {
        self.aliases
            .candidates(text)
            .iter()
            .map(|m| m.book)
            .find(|book| self.canon.contains(*book))
            .ok_or_else(|| ReferenceError::UnrecognizedBook {
                text: text.to_string(),
            })
    }

    fn single_book(
        &self,
        book: Book,
        start: Position,
        end: Option<Position>,
    ) -> ReferenceResult<NormalizedReference> {
        let (start, end) = if self.canon.is_single_chapter(book)? {
            single_chapter_tail(start, end)
        } else {
            (start, end)
        };

        let (start_chapter, start_verse) = match start {
            (None, None) => return NormalizedReference::whole_book(self.canon, book),
            (Some(chapter), verse) => (chapter, verse),
            (None, Some(verse)) => return Err(missing_chapter(verse)),
        };

        let end = match end.unwrap_or_default() {
            (None, None) => match start_verse {
                Some(verse) => (start_chapter, verse),
                None => (start_chapter, self.last_verse_of(book, start_chapter)?),
            },
            (None, Some(verse)) => (start_chapter, verse),
            (Some(chapter), None) => (chapter, self.last_verse_of(book, chapter)?),
            (Some(chapter), Some(verse)) => (chapter, verse),
        };

        Ok(NormalizedReference::new(
            book,
            (start_chapter, start_verse.unwrap_or(1)),
            end,
        ))
    }

    fn cross_book(
        &self,
        book: Book,
        start: Position,
        end_book: Book,
        end: Position,
    ) -> ReferenceResult<NormalizedReference> {
        let start = self.chapter_as_verse(book, start)?;
        let end = self.chapter_as_verse(end_book, end)?;

        let start = match start {
            (None, None) => (1, 1),
            (Some(chapter), verse) => (chapter, verse.unwrap_or(1)),
            (None, Some(verse)) => return Err(missing_chapter(verse)),
        };
        let end = match end {
            (None, None) => self.canon.last_verse(end_book)?,
            (Some(chapter), None) => (chapter, self.last_verse_of(end_book, chapter)?),
            (Some(chapter), Some(verse)) => (chapter, verse),
            (None, Some(verse)) => return Err(missing_chapter(verse)),
        };
        Ok(NormalizedReference::cross_book(book, start, end_book, end))
    }

    /// One side of a cross-book range: "Jude 3" is verse 3 of Jude's only chapter
    fn chapter_as_verse(&self, book: Book, position: Position) -> ReferenceResult<Position> {
        match position {
            (Some(chapter), None) if chapter != 1 && self.canon.is_single_chapter(book)? => {
                Ok((Some(1), Some(chapter)))
            }
            other => Ok(other),
        }
    }

    /// Last verse of a chapter, reporting a bad chapter as `InvalidReference`
    fn last_verse_of(&self, book: Book, chapter: u16) -> ReferenceResult<u16> {
        self.canon.check_chapter(book, chapter)?;
        self.canon.verse_count(book, chapter)
    }
}

/// Read chapter numbers as verses of chapter 1, keeping a bare "1"
fn single_chapter_tail(start: Position, end: Option<Position>) -> (Position, Option<Position>) {
    match (start, end) {
        ((Some(1), None), None) => (start, end),
        ((Some(verse), None), end) => {
            let end = end.map(|position| match position {
                (Some(last), None) => (None, Some(last)),
                other => other,
            });
            ((Some(1), Some(verse)), end)
        }
        _ => (start, end),
    }
}

fn parse_point(point: RawPoint<'_>) -> ReferenceResult<Position> {
    Ok((
        point.chapter.map(parse_number).transpose()?,
        point.verse.map(parse_number).transpose()?,
    ))
}

fn parse_number(text: &str) -> ReferenceResult<u16> {
    text.trim()
        .parse::<u16>()
        .map_err(|_| ReferenceError::MalformedNumber {
            text: text.to_string(),
        })
}

fn missing_chapter(verse: u16) -> ReferenceError {
    ReferenceError::MalformedNumber {
        text: format!(":{}", verse),
    }
}
