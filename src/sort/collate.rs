// src/sort/collate.rs
//! Base-strength text collation: letters compare equal regardless of case
//! and accents, so "Ábaco" and "abaco" tie.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Collation key: canonical decomposition, combining marks removed, lowercased.
///
/// Latin letters with no decomposition (`ß`, `æ`, `ø`, ...) are spelled out
/// so they sort next to their base letters. Other scripts keep code point
/// order, which is not a locale-aware ordering.
pub fn fold(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    for c in text.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase) {
        match c {
            'ß' => key.push_str("ss"),
            'æ' => key.push_str("ae"),
            'œ' => key.push_str("oe"),
            'ø' => key.push('o'),
            'ł' => key.push('l'),
            'đ' => key.push('d'),
            'ı' => key.push('i'),
            _ => key.push(c),
        }
    }
    key
}

pub fn compare_text(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b))
}
