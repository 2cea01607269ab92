//! Reference scanner: free text to raw reference tokens
//!
//! A single left-to-right pass over the words of the input. At each word the
//! scanner tries the longest run of words that forms a known book alias,
//! then parses the numeric tail after it with the `grammar` parsers. A match
//! yields one [`RawReferenceToken`] per comma-separated item.
//!
//! The scanner never fails. Candidates that do not look like references are
//! skipped, and malformed numeric fragments drop the whole candidate.

mod grammar;

use std::collections::VecDeque;
use std::ops::Range;

use serde::Serialize;

use crate::alias::{normalize_alias, AliasKind, AliasTable};
use grammar::{RawNumbers, TailItem};

/// An unparsed position: chapter and verse substrings as written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RawPoint<'t> {
    pub chapter: Option<&'t str>,
    pub verse: Option<&'t str>,
}

impl<'t> RawPoint<'t> {
    pub fn chapter(chapter: &'t str) -> Self {
        Self {
            chapter: Some(chapter),
            verse: None,
        }
    }

    pub fn verse(chapter: &'t str, verse: &'t str) -> Self {
        Self {
            chapter: Some(chapter),
            verse: Some(verse),
        }
    }

    /// A verse in the chapter implied by the other side of a range
    pub fn bare_verse(verse: &'t str) -> Self {
        Self {
            chapter: None,
            verse: Some(verse),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chapter.is_none() && self.verse.is_none()
    }

    fn from_numbers((chapter, verse): RawNumbers<'t>) -> Self {
        Self {
            chapter: Some(chapter),
            verse,
        }
    }
}

/// One scanned reference candidate, not yet validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawReferenceToken<'t> {
    /// Byte range of the mention in the scanned text
    pub span: Range<usize>,
    /// The mention as written
    pub text: &'t str,
    /// Book alias as written
    pub book: &'t str,
    /// Start position; empty for a book-only mention
    pub start: RawPoint<'t>,
    /// End position of a range
    pub end: Option<RawPoint<'t>>,
    /// End book alias of a cross-book range
    pub end_book: Option<&'t str>,
}

/// A book alias found at a run of words
#[derive(Debug, Clone)]
struct BookMatch {
    /// Index of the last word of the alias
    last_word: usize,
    span: Range<usize>,
    kind: AliasKind,
    capitalized: bool,
}

impl BookMatch {
    /// Whether this alias may stand alone as a whole-book mention
    fn allows_book_only(&self) -> bool {
        self.kind.is_full_name() && self.capitalized
    }

    /// Whether this alias may lead a chapter/verse tail
    fn allows_tail(&self) -> bool {
        self.kind.is_full_name() || self.capitalized
    }
}

/// Lazy scanner over one text. Restart by scanning the text again.
pub struct Scanner<'t, 'a> {
    text: &'t str,
    aliases: &'a AliasTable,
    words: Vec<Range<usize>>,
    cursor: usize,
    pending: VecDeque<RawReferenceToken<'t>>,
}

impl<'t, 'a> Scanner<'t, 'a> {
    pub fn new(text: &'t str, aliases: &'a AliasTable) -> Self {
        Self {
            text,
            aliases,
            words: word_positions(text),
            cursor: 0,
            pending: VecDeque::new(),
        }
    }

    /// Try the longest alias starting at word `start`
    fn match_book(&self, start: usize) -> Option<BookMatch> {
        let longest = self.aliases.max_words().min(self.words.len() - start);
        let mut last = start;
        let mut reachable = 1;
        // Words of one alias may only be separated by spaces and dots, or by
        // a comma between two non-numeric words ("Kings, Commonly Called")
        while reachable < longest {
            let gap = &self.text[self.words[last].end..self.words[last + 1].start];
            let spaced = gap.chars().all(|c| c.is_whitespace() || c == '.');
            let titled = gap.trim() == ","
                && !self.starts_with_digit(last)
                && !self.starts_with_digit(last + 1);
            if !spaced && !titled {
                break;
            }
            last += 1;
            reachable += 1;
        }

        (0..reachable).rev().find_map(|extra| {
            let last_word = start + extra;
            let span = self.words[start].start..self.words[last_word].end;
            let written = &self.text[span.clone()];
            let found = self.aliases.lookup_normalized(&normalize_alias(written))?;
            Some(BookMatch {
                last_word,
                capitalized: written
                    .chars()
                    .find(|c| c.is_alphabetic())
                    .is_some_and(char::is_uppercase),
                span,
                kind: found.kind,
            })
        })
    }

    fn starts_with_digit(&self, word: usize) -> bool {
        self.text[self.words[word].clone()]
            .starts_with(|c: char| c.is_ascii_digit())
    }

    /// Alias starting exactly at byte `offset`, if a word starts there
    fn match_book_at(&self, offset: usize) -> Option<BookMatch> {
        let idx = self.words.binary_search_by_key(&offset, |w| w.start).ok()?;
        self.match_book(idx)
    }

    /// First word index starting at or after byte `offset`
    fn word_after(&self, offset: usize) -> usize {
        self.words.partition_point(|w| w.start < offset)
    }

    fn skip_dots(&self, offset: usize) -> usize {
        offset
            + self.text[offset..]
                .chars()
                .take_while(|c| *c == '.')
                .count()
    }

    /// Scan the candidate at the cursor, queueing any tokens it yields and
    /// advancing the cursor past what it consumed.
    fn scan_candidate(&mut self) {
        let Some(book) = self.match_book(self.cursor) else {
            self.cursor += 1;
            return;
        };

        let after_book = self.skip_dots(book.span.end);
        let mut items = match grammar::tail(&self.text[after_book..]) {
            Ok(items) => items,
            Err(grammar::Malformed) => {
                self.reject(&book, "malformed chapter or verse");
                self.cursor = book.last_word + 1;
                return;
            }
        };
        self.release_book_prefixes(after_book, &mut items);

        match self.cross_book(&book, after_book, &items) {
            Ok(Some((token, consumed))) => {
                self.pending.push_back(token);
                self.cursor = self.word_after(consumed);
                return;
            }
            Ok(None) => {}
            Err(grammar::Malformed) => {
                self.reject(&book, "malformed cross-book range end");
                self.cursor = book.last_word + 1;
                return;
            }
        }

        if items.is_empty() {
            if book.allows_book_only() {
                self.pending.push_back(RawReferenceToken {
                    span: book.span.clone(),
                    text: &self.text[book.span.clone()],
                    book: &self.text[book.span.clone()],
                    start: RawPoint::default(),
                    end: None,
                    end_book: None,
                });
                self.cursor = book.last_word + 1;
            } else {
                self.cursor += 1;
            }
            return;
        }

        if !book.allows_tail() {
            self.cursor += 1;
            return;
        }

        let consumed = self.push_items(&book, after_book, &items);
        self.cursor = self.word_after(consumed);
    }

    /// Drop list items and range ends whose number opens a numbered book
    /// ("Genesis 1, 2 Kings 3", "Genesis 1 - 2 Kings 3").
    fn release_book_prefixes(&self, after_book: usize, items: &mut Vec<TailItem<'t>>) {
        let opens_book =
            |offset: usize| self.match_book_at(after_book + offset).is_some();

        if let Some(idx) = items.iter().position(|item| opens_book(item.offset)) {
            items.truncate(idx);
        }
        if let Some(item) = items.last_mut() {
            if matches!(item.end, Some((offset, _)) if opens_book(offset)) {
                item.end = None;
                item.len = item.start_len;
            }
        }
    }

    /// Recognize `Book [point] - Book [point]`.
    ///
    /// Only a mention with at most one item and no same-book range end can
    /// continue into another book.
    fn cross_book(
        &self,
        book: &BookMatch,
        after_book: usize,
        items: &[TailItem<'t>],
    ) -> Result<Option<(RawReferenceToken<'t>, usize)>, grammar::Malformed> {
        let start_item = match items {
            [] => None,
            [item] if item.end.is_none() => Some(item),
            _ => return Ok(None),
        };
        let dash_at = start_item.map_or(after_book, |item| after_book + item.offset + item.len);

        let Ok((rest, _)) = grammar::dash(&self.text[dash_at..]) else {
            return Ok(None);
        };
        let Some(end_book) = self.match_book_at(self.text.len() - rest.len()) else {
            return Ok(None);
        };

        let after_end_book = self.skip_dots(end_book.span.end);
        let end_point = grammar::opening_point(&self.text[after_end_book..])?;

        let start_ok = match start_item {
            Some(_) => book.allows_tail(),
            None => book.allows_book_only(),
        };
        let end_ok = match end_point {
            Some(_) => end_book.allows_tail(),
            None => end_book.allows_book_only(),
        };
        if !(start_ok && end_ok) {
            return Ok(None);
        }

        let consumed = end_point.map_or(end_book.span.end, |(len, _)| after_end_book + len);
        let span = book.span.start..consumed;
        let token = RawReferenceToken {
            text: &self.text[span.clone()],
            span,
            book: &self.text[book.span.clone()],
            start: start_item.map_or_else(RawPoint::default, |item| RawPoint::from_numbers(item.start)),
            end: Some(end_point.map_or_else(RawPoint::default, |(_, n)| RawPoint::from_numbers(n))),
            end_book: Some(&self.text[end_book.span.clone()]),
        };
        Ok(Some((token, consumed)))
    }

    /// Queue one token per list item, carrying chapter context forward.
    /// Returns the byte offset past the last item.
    fn push_items(&mut self, book: &BookMatch, after_book: usize, items: &[TailItem<'t>]) -> usize {
        let book_text = &self.text[book.span.clone()];
        // Chapter of the previous item's final point, when that point had a verse
        let mut verse_context: Option<&'t str> = None;
        let mut consumed = after_book;

        for (idx, item) in items.iter().enumerate() {
            let start = match (item.start, verse_context) {
                ((number, None), Some(chapter)) => RawPoint::verse(chapter, number),
                (numbers, _) => RawPoint::from_numbers(numbers),
            };
            let end = item.end.map(|(_, numbers)| match numbers {
                (number, None) if start.verse.is_some() => RawPoint::bare_verse(number),
                numbers => RawPoint::from_numbers(numbers),
            });

            let last = end.unwrap_or(start);
            verse_context = match last.verse {
                Some(_) => last.chapter.or(start.chapter),
                None => None,
            };

            let item_start = after_book + item.offset;
            let item_end = item_start + item.len;
            let span = if idx == 0 {
                book.span.start..item_end
            } else {
                item_start..item_end
            };
            self.pending.push_back(RawReferenceToken {
                text: &self.text[span.clone()],
                span,
                book: book_text,
                start,
                end,
                end_book: None,
            });
            consumed = item_end;
        }

        consumed
    }

    fn reject(&self, book: &BookMatch, reason: &str) {
        tracing::debug!(
            book = &self.text[book.span.clone()],
            offset = book.span.start,
            reason,
            "reference candidate rejected"
        );
    }
}

impl<'t, 'a> Iterator for Scanner<'t, 'a> {
    type Item = RawReferenceToken<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.cursor >= self.words.len() {
                return None;
            }
            self.scan_candidate();
        }
    }
}

/// Scan `text` for reference candidates
pub fn scan<'t, 'a>(text: &'t str, aliases: &'a AliasTable) -> Scanner<'t, 'a> {
    Scanner::new(text, aliases)
}

/// Byte ranges of the alphanumeric runs in `s`
fn word_positions(s: &str) -> Vec<Range<usize>> {
    let mut result = Vec::new();
    let mut word_start = None;

    for (i, c) in s.char_indices() {
        match (c.is_alphanumeric(), word_start) {
            (true, None) => word_start = Some(i),
            (false, Some(start)) => {
                result.push(start..i);
                word_start = None;
            }
            _ => {}
        }
    }

    // Handle trailing word
    if let Some(start) = word_start {
        result.push(start..s.len());
    }

    result
}
