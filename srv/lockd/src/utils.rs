use chrono::{DateTime, Utc};

use crate::models::{MAX_WORD_LENGTH, MIN_WORD_LENGTH};

pub const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];
pub const CONSONANTS: [char; 21] = [
    'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'n', 'p', 'q', 'r', 's', 't', 'v', 'w',
    'x', 'y', 'z',
];

pub const MS_PER_DAY: i64 = 86_400_000;

pub fn is_vowel(ch: char) -> bool {
    VOWELS.contains(&ch.to_ascii_lowercase())
}

/// Days since the Unix epoch, by plain division of milliseconds (UTC, no timezone).
pub fn epoch_day(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_millis().div_euclid(MS_PER_DAY)
}

pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// A puzzle answer: 3 to 6 ASCII letters.
pub fn is_playable_word(word: &str) -> bool {
    (MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&word.len())
        && word.chars().all(|c| c.is_ascii_alphabetic())
}
