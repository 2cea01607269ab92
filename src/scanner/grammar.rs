//! Nom grammar for the numeric tail that follows a book name
//!
//! ```text
//! tail   := ws* item (ws* "," ws* item)*
//! item   := point (ws* dash ws* point)?
//! point  := number (ws* ":" ws* number)?
//! number := digit+          -- not followed by a letter
//! dash   := "-" | "–" | "—"
//! ```
//!
//! A colon that is not followed by a number is a hard failure: the whole
//! candidate is dropped rather than read as a shorter reference.

use nom::{
    character::complete::{char, digit1, one_of, satisfy, space0},
    combinator::{cut, not, opt},
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

/// `(chapter-or-number, verse)` as written
pub(crate) type RawNumbers<'a> = (&'a str, Option<&'a str>);

/// One comma-separated element of a tail
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TailItem<'a> {
    /// Byte offset of the item within the tail
    pub offset: usize,
    /// Byte length of the item
    pub len: usize,
    pub start: RawNumbers<'a>,
    /// Byte length of the start point alone
    pub start_len: usize,
    /// Range end, with the byte offset (within the tail) where it begins
    pub end: Option<(usize, RawNumbers<'a>)>,
}

/// The candidate is not a reference: a number was required but missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Malformed;

pub(crate) fn number(input: &str) -> IResult<&str, &str> {
    terminated(
        digit1,
        not(satisfy(char::is_alphanumeric)),
    )(input)
}

fn colon(input: &str) -> IResult<&str, char> {
    delimited(space0, char(':'), space0)(input)
}

/// Range separator, with optional surrounding spaces
pub(crate) fn dash(input: &str) -> IResult<&str, char> {
    delimited(space0, one_of("-\u{2013}\u{2014}"), space0)(input)
}

fn comma(input: &str) -> IResult<&str, char> {
    delimited(space0, char(','), space0)(input)
}

/// `chapter` or `chapter:verse`
pub(crate) fn point(input: &str) -> IResult<&str, RawNumbers<'_>> {
    pair(number, opt(preceded(colon, cut(number))))(input)
}

/// Parse the numeric tail following a book name.
///
/// Returns an empty list when no number follows, and `Malformed` when a
/// number was started but not finished.
pub(crate) fn tail(input: &str) -> Result<Vec<TailItem<'_>>, Malformed> {
    let mut items: Vec<TailItem<'_>> = Vec::new();
    let mut rest = input;

    loop {
        let separated = if items.is_empty() {
            space0::<_, nom::error::Error<&str>>(rest).map(|(r, _)| r)
        } else {
            comma(rest).map(|(r, _)| r)
        };
        let Ok(after_sep) = separated else {
            break;
        };

        let offset = input.len() - after_sep.len();
        let (after_start, start) = match point(after_sep) {
            Ok(parsed) => parsed,
            Err(nom::Err::Failure(_)) => return Err(Malformed),
            Err(_) => break,
        };

        let (after_item, end) = match dash(after_start) {
            Ok((after_dash, _)) => match point(after_dash) {
                Ok((after_end, end)) => (after_end, Some((input.len() - after_dash.len(), end))),
                Err(nom::Err::Failure(_)) => return Err(Malformed),
                Err(_) => (after_start, None),
            },
            Err(_) => (after_start, None),
        };

        items.push(TailItem {
            offset,
            len: after_sep.len() - after_item.len(),
            start,
            start_len: after_sep.len() - after_start.len(),
            end,
        });
        rest = after_item;
    }

    Ok(items)
}

/// Optional point after the end book of a cross-book range.
///
/// Returns the byte offset just past the point.
pub(crate) fn opening_point(input: &str) -> Result<Option<(usize, RawNumbers<'_>)>, Malformed> {
    match preceded(space0, point)(input) {
        Ok((rest, numbers)) => Ok(Some((input.len() - rest.len(), numbers))),
        Err(nom::Err::Failure(_)) => Err(Malformed),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_number() {
        assert_eq!(number("132."), Ok((".", "132")));
        assert_eq!(number("25"), Ok(("", "25")));
        assert_eq!(number("1000 "), Ok((" ", "1000")));
        assert!(number("50th").is_err());
        assert!(number("x").is_err());
    }

    #[test]
    fn test_point() {
        assert_eq!(point("1:2"), Ok(("", ("1", Some("2")))));
        assert_eq!(point("142 : 5"), Ok(("", ("142", Some("5")))));
        assert_eq!(point("43:    324"), Ok(("", ("43", Some("324")))));
        assert_eq!(point("3 and"), Ok((" and", ("3", None))));
        assert!(matches!(point("3: and"), Err(nom::Err::Failure(_))));
    }

    #[test]
    fn test_empty_tail() {
        assert_eq!(tail(" has 50 chapters"), Ok(vec![]));
        assert_eq!(tail(""), Ok(vec![]));
    }

    #[test]
    fn test_single_items() {
        let items = tail(" 1:1-3").unwrap();
        assert_eq!(
            items,
            vec![TailItem {
                offset: 1,
                len: 5,
                start: ("1", Some("1")),
                start_len: 3,
                end: Some((5, ("3", None))),
            }]
        );

        let items = tail(" 142 : 5 - 53 : 23").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].start, ("142", Some("5")));
        assert_eq!(items[0].end, Some((11, ("53", Some("23")))));
        assert_eq!(items[0].len, 17);
    }

    #[test]
    fn test_lists() {
        let items = tail(" 29:32-30:10,11 and more").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].start, ("29", Some("32")));
        assert_eq!(items[0].end.map(|(_, n)| n), Some(("30", Some("10"))));
        assert_eq!(items[1].start, ("11", None));
        assert_eq!(items[1].offset, 13);
        assert_eq!(items[1].len, 2);

        let items = tail(" 123 : 5 - 13, 16 - 18").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].start, ("16", None));
        assert_eq!(items[1].end.map(|(_, n)| n), Some(("18", None)));
    }

    #[test]
    fn test_list_stops_at_words() {
        let items = tail(" 1, Exodus 2").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].len, 1);
    }

    #[test]
    fn test_dash_before_book_is_not_consumed() {
        let items = tail(" 1:1 - John 21:25").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].end, None);
        assert_eq!(items[0].len, 3);
    }

    #[test]
    fn test_alternate_dashes() {
        let items = tail(" 1\u{2013}3").unwrap();
        assert_eq!(items[0].end.map(|(_, n)| n), Some(("3", None)));
        let items = tail(" 1:1\u{2014}2:3").unwrap();
        assert_eq!(items[0].end.map(|(_, n)| n), Some(("2", Some("3"))));
    }

    #[test]
    fn test_opening_point() {
        assert_eq!(opening_point(" 21:25 and"), Ok(Some((6, ("21", Some("25"))))));
        assert_eq!(opening_point(" 3"), Ok(Some((2, ("3", None)))));
        assert_eq!(opening_point(", then"), Ok(None));
        assert_eq!(opening_point(" 4: x"), Err(Malformed));
    }

    #[test]
    fn test_dangling_colon_is_malformed() {
        assert_eq!(tail(" 1: In the beginning"), Err(Malformed));
        assert_eq!(tail(" 1:1-2: x"), Err(Malformed));
        assert_eq!(tail(" 1, 2:"), Err(Malformed));
    }
}
