//! Text normalization for book alias matching
//!
//! Provides normalization for book names and abbreviations:
//! - Unicode NFKC normalization
//! - Lowercase conversion
//! - Punctuation stripping (replaced with whitespace)
//! - Whitespace collapsing
//! - Ordinal prefix folding ("I", "1st", "First", "Primero" -> "1")

use unicode_normalization::UnicodeNormalization;

/// Ordinal spellings folded to their digit form when they lead a name
const ORDINALS: &[(&str, &str)] = &[
    ("i", "1"),
    ("1st", "1"),
    ("first", "1"),
    ("primero", "1"),
    ("primeiro", "1"),
    ("ii", "2"),
    ("2nd", "2"),
    ("second", "2"),
    ("segundo", "2"),
    ("iii", "3"),
    ("3rd", "3"),
    ("third", "3"),
    ("tercero", "3"),
    ("terceiro", "3"),
];

/// Normalize alias text into a lookup key.
///
/// Performs:
/// - Unicode NFKC fold
/// - Lowercase conversion
/// - Strip punctuation (replace with space)
/// - Split a leading number from the name ("1jn" -> "1 jn")
/// - Fold a leading ordinal word when a name follows it
/// - Collapse whitespace
///
/// # Examples
///
/// ```
/// use scripture_refs::alias::normalize::normalize_alias;
///
/// assert_eq!(normalize_alias("Gen."), "gen");
/// assert_eq!(normalize_alias("I  John"), "1 john");
/// assert_eq!(normalize_alias("1Jn"), "1 jn");
/// ```
pub fn normalize_alias(s: &str) -> String {
    let folded: String = s.nfkc().collect();

    let stripped: String = folded
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase();

    let mut tokens: Vec<&str> = Vec::new();
    for token in stripped.split_whitespace() {
        let digits = token.chars().take_while(|c| c.is_ascii_digit()).count();
        if tokens.is_empty() && digits > 0 && digits < token.len() && !is_ordinal(token) {
            tokens.push(&token[..digits]);
            tokens.push(&token[digits..]);
        } else {
            tokens.push(token);
        }
    }

    if tokens.len() > 1 {
        if let Some((_, digit)) = ORDINALS.iter().find(|(word, _)| *word == tokens[0]) {
            tokens[0] = *digit;
        }
    }

    tokens.join(" ")
}

fn is_ordinal(token: &str) -> bool {
    ORDINALS.iter().any(|(word, _)| *word == token)
}
