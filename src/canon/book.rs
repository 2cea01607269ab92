//! The closed enumeration of books known to the crate.
//!
//! Discriminants follow canonical reading order, so the derived `Ord` is the
//! canonical order. The final six values are the deuterocanonical books that
//! the extended canon includes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CanonLookup, ReferenceError};

/// A book of the Bible, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Book {
    Genesis = 1,
    Exodus = 2,
    Leviticus = 3,
    Numbers = 4,
    Deuteronomy = 5,
    Joshua = 6,
    Judges = 7,
    Ruth = 8,
    FirstSamuel = 9,
    SecondSamuel = 10,
    FirstKings = 11,
    SecondKings = 12,
    FirstChronicles = 13,
    SecondChronicles = 14,
    Ezra = 15,
    Nehemiah = 16,
    Esther = 17,
    Job = 18,
    Psalms = 19,
    Proverbs = 20,
    Ecclesiastes = 21,
    SongOfSongs = 22,
    Isaiah = 23,
    Jeremiah = 24,
    Lamentations = 25,
    Ezekiel = 26,
    Daniel = 27,
    Hosea = 28,
    Joel = 29,
    Amos = 30,
    Obadiah = 31,
    Jonah = 32,
    Micah = 33,
    Nahum = 34,
    Habakkuk = 35,
    Zephaniah = 36,
    Haggai = 37,
    Zechariah = 38,
    Malachi = 39,
    Matthew = 40,
    Mark = 41,
    Luke = 42,
    John = 43,
    Acts = 44,
    Romans = 45,
    FirstCorinthians = 46,
    SecondCorinthians = 47,
    Galatians = 48,
    Ephesians = 49,
    Philippians = 50,
    Colossians = 51,
    FirstThessalonians = 52,
    SecondThessalonians = 53,
    FirstTimothy = 54,
    SecondTimothy = 55,
    Titus = 56,
    Philemon = 57,
    Hebrews = 58,
    James = 59,
    FirstPeter = 60,
    SecondPeter = 61,
    FirstJohn = 62,
    SecondJohn = 63,
    ThirdJohn = 64,
    Jude = 65,
    Revelation = 66,
    FirstEsdras = 67,
    Tobit = 68,
    WisdomOfSolomon = 69,
    Ecclesiasticus = 70,
    FirstMaccabees = 71,
    SecondMaccabees = 72,
}

impl Book {
    /// Every enumerated book in canonical order
    pub const ALL: [Book; 72] = [
        Book::Genesis,
        Book::Exodus,
        Book::Leviticus,
        Book::Numbers,
        Book::Deuteronomy,
        Book::Joshua,
        Book::Judges,
        Book::Ruth,
        Book::FirstSamuel,
        Book::SecondSamuel,
        Book::FirstKings,
        Book::SecondKings,
        Book::FirstChronicles,
        Book::SecondChronicles,
        Book::Ezra,
        Book::Nehemiah,
        Book::Esther,
        Book::Job,
        Book::Psalms,
        Book::Proverbs,
        Book::Ecclesiastes,
        Book::SongOfSongs,
        Book::Isaiah,
        Book::Jeremiah,
        Book::Lamentations,
        Book::Ezekiel,
        Book::Daniel,
        Book::Hosea,
        Book::Joel,
        Book::Amos,
        Book::Obadiah,
        Book::Jonah,
        Book::Micah,
        Book::Nahum,
        Book::Habakkuk,
        Book::Zephaniah,
        Book::Haggai,
        Book::Zechariah,
        Book::Malachi,
        Book::Matthew,
        Book::Mark,
        Book::Luke,
        Book::John,
        Book::Acts,
        Book::Romans,
        Book::FirstCorinthians,
        Book::SecondCorinthians,
        Book::Galatians,
        Book::Ephesians,
        Book::Philippians,
        Book::Colossians,
        Book::FirstThessalonians,
        Book::SecondThessalonians,
        Book::FirstTimothy,
        Book::SecondTimothy,
        Book::Titus,
        Book::Philemon,
        Book::Hebrews,
        Book::James,
        Book::FirstPeter,
        Book::SecondPeter,
        Book::FirstJohn,
        Book::SecondJohn,
        Book::ThirdJohn,
        Book::Jude,
        Book::Revelation,
        Book::FirstEsdras,
        Book::Tobit,
        Book::WisdomOfSolomon,
        Book::Ecclesiasticus,
        Book::FirstMaccabees,
        Book::SecondMaccabees,
    ];

    /// Stable numeric identifier (1-based canonical position)
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look a book up by identifier.
    ///
    /// Fails with `OutOfCanon` for identifiers outside the enumeration; this
    /// is the boundary where dynamically constructed values enter the crate.
    pub fn from_id(id: u8) -> Result<Book, ReferenceError> {
        id.checked_sub(1)
            .and_then(|idx| Self::ALL.get(usize::from(idx)))
            .copied()
            .ok_or_else(|| ReferenceError::OutOfCanon {
                lookup: CanonLookup::BookId(id),
                canon: "enumerated".to_string(),
            })
    }

    /// Common English name
    pub fn title(self) -> &'static str {
        match self {
            Book::Genesis => "Genesis",
            Book::Exodus => "Exodus",
            Book::Leviticus => "Leviticus",
            Book::Numbers => "Numbers",
            Book::Deuteronomy => "Deuteronomy",
            Book::Joshua => "Joshua",
            Book::Judges => "Judges",
            Book::Ruth => "Ruth",
            Book::FirstSamuel => "1 Samuel",
            Book::SecondSamuel => "2 Samuel",
            Book::FirstKings => "1 Kings",
            Book::SecondKings => "2 Kings",
            Book::FirstChronicles => "1 Chronicles",
            Book::SecondChronicles => "2 Chronicles",
            Book::Ezra => "Ezra",
            Book::Nehemiah => "Nehemiah",
            Book::Esther => "Esther",
            Book::Job => "Job",
            Book::Psalms => "Psalms",
            Book::Proverbs => "Proverbs",
            Book::Ecclesiastes => "Ecclesiastes",
            Book::SongOfSongs => "Song of Songs",
            Book::Isaiah => "Isaiah",
            Book::Jeremiah => "Jeremiah",
            Book::Lamentations => "Lamentations",
            Book::Ezekiel => "Ezekiel",
            Book::Daniel => "Daniel",
            Book::Hosea => "Hosea",
            Book::Joel => "Joel",
            Book::Amos => "Amos",
            Book::Obadiah => "Obadiah",
            Book::Jonah => "Jonah",
            Book::Micah => "Micah",
            Book::Nahum => "Nahum",
            Book::Habakkuk => "Habakkuk",
            Book::Zephaniah => "Zephaniah",
            Book::Haggai => "Haggai",
            Book::Zechariah => "Zechariah",
            Book::Malachi => "Malachi",
            Book::Matthew => "Matthew",
            Book::Mark => "Mark",
            Book::Luke => "Luke",
            Book::John => "John",
            Book::Acts => "Acts",
            Book::Romans => "Romans",
            Book::FirstCorinthians => "1 Corinthians",
            Book::SecondCorinthians => "2 Corinthians",
            Book::Galatians => "Galatians",
            Book::Ephesians => "Ephesians",
            Book::Philippians => "Philippians",
            Book::Colossians => "Colossians",
            Book::FirstThessalonians => "1 Thessalonians",
            Book::SecondThessalonians => "2 Thessalonians",
            Book::FirstTimothy => "1 Timothy",
            Book::SecondTimothy => "2 Timothy",
            Book::Titus => "Titus",
            Book::Philemon => "Philemon",
            Book::Hebrews => "Hebrews",
            Book::James => "James",
            Book::FirstPeter => "1 Peter",
            Book::SecondPeter => "2 Peter",
            Book::FirstJohn => "1 John",
            Book::SecondJohn => "2 John",
            Book::ThirdJohn => "3 John",
            Book::Jude => "Jude",
            Book::Revelation => "Revelation",
            Book::FirstEsdras => "1 Esdras",
            Book::Tobit => "Tobit",
            Book::WisdomOfSolomon => "Wisdom of Solomon",
            Book::Ecclesiasticus => "Ecclesiasticus",
            Book::FirstMaccabees => "1 Maccabees",
            Book::SecondMaccabees => "2 Maccabees",
        }
    }

    pub fn is_deuterocanonical(self) -> bool {
        self >= Book::FirstEsdras
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
