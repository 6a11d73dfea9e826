use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, BufRead};
use log::{info, warn};
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::error::DictionaryError;
use crate::models::{MAX_WORD_LENGTH, MIN_WORD_LENGTH};
use crate::store::Dictionary;
use crate::utils::is_playable_word;

/// Load playable words from a plain text file (one word per line)
pub fn load_words(file_path: &str) -> io::Result<HashSet<String>> {
    let file = File::open(file_path)?;
    let reader = io::BufReader::new(file);

    let mut words = HashSet::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim().to_lowercase();
        if is_playable_word(&word) {
            words.insert(word);
        }
    }

    Ok(words)
}

/// Load and merge lexicon, insertions, and deletions for a language
pub fn load_filtered_words(base_dir: &str, lang: &str) -> HashSet<String> {
    let lang_dir = format!("{}/words/{}", base_dir, lang);

    let valid_path = format!("{}/lexicon.txt", lang_dir);
    let custom_path = format!("{}/insertions.txt", lang_dir);
    let censored_path = format!("{}/deletions.txt", lang_dir);

    let mut words = load_words(&valid_path)
        .unwrap_or_else(|_| {
            warn!("Failed to load main lexicon for {} at {}.", lang, valid_path);
            HashSet::new()
        });

    if let Ok(custom) = load_words(&custom_path) {
        info!("Inserted {} words into {} lexicon.", custom.len(), lang);
        words.extend(custom);
    }

    if let Ok(censored) = load_words(&censored_path) {
        info!("Deleted {} words from {} lexicon.", censored.len(), lang);
        for word in censored {
            words.remove(&word);
        }
    }

    info!(
        "Total playable words for {} ({}-{} letters): {}",
        lang, MIN_WORD_LENGTH, MAX_WORD_LENGTH, words.len()
    );
    words
}

/// Immutable word list, loaded once at startup and grouped by length.
#[derive(Debug, Default)]
pub struct WordList {
    words: HashSet<String>,
    by_length: HashMap<usize, Vec<String>>,
}

impl WordList {
    pub fn new(words: HashSet<String>) -> Self {
        let mut by_length: HashMap<usize, Vec<String>> = HashMap::new();
        for word in &words {
            by_length.entry(word.len()).or_default().push(word.clone());
        }
        // Stable order so a seeded source picks the same word every run.
        for group in by_length.values_mut() {
            group.sort();
        }

        Self { words, by_length }
    }

    pub fn load(base_dir: &str, lang: &str) -> Self {
        Self::new(load_filtered_words(base_dir, lang))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn count_of_length(&self, length: usize) -> usize {
        self.by_length.get(&length).map(Vec::len).unwrap_or(0)
    }
}

impl FromIterator<String> for WordList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|w| w.to_lowercase())
                .filter(|w| is_playable_word(w))
                .collect(),
        )
    }
}

impl Dictionary for WordList {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    fn random_word_of_length(
        &self,
        length: usize,
        rng: &mut dyn RngCore,
    ) -> Result<String, DictionaryError> {
        self.by_length
            .get(&length)
            .and_then(|group| group.choose(rng))
            .cloned()
            .ok_or(DictionaryError::NoWords(length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::fs;
    use std::io::Write;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("lockd-{}-{}", name, std::process::id()));
        fs::create_dir_all(dir.join("words/en")).unwrap();
        dir
    }

    fn write_list(path: std::path::PathBuf, words: &[&str]) {
        let mut file = File::create(path).unwrap();
        for w in words {
            writeln!(file, "{}", w).unwrap();
        }
    }

    #[test]
    fn test_load_filtered_words() {
        let dir = scratch_dir("filtered");
        write_list(
            dir.join("words/en/lexicon.txt"),
            &["Crane", "lock", "a", "toolong", "c4t", "  slate  "],
        );
        write_list(dir.join("words/en/insertions.txt"), &["zzz"]);
        write_list(dir.join("words/en/deletions.txt"), &["SLATE"]);

        let words = load_filtered_words(dir.to_str().unwrap(), "en");
        let mut sorted: Vec<_> = words.into_iter().collect();
        sorted.sort();
        assert_eq!(sorted, vec!["crane", "lock", "zzz"]);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_lexicon_is_empty() {
        let words = load_filtered_words("/nonexistent/share", "xx");
        assert!(words.is_empty());
    }

    #[test]
    fn test_word_list_contains_is_case_insensitive() {
        let list: WordList = ["crane", "lock"].iter().map(|w| w.to_string()).collect();
        assert!(list.contains("CRANE"));
        assert!(list.contains("lock"));
        assert!(!list.contains("slate"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_random_word_of_length() {
        let list: WordList = ["crane", "slate", "lock"].iter().map(|w| w.to_string()).collect();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..10 {
            let word = list.random_word_of_length(5, &mut rng).unwrap();
            assert!(word == "crane" || word == "slate");
        }
        assert_eq!(list.random_word_of_length(4, &mut rng).unwrap(), "lock");
        assert!(matches!(
            list.random_word_of_length(6, &mut rng),
            Err(DictionaryError::NoWords(6))
        ));
        assert_eq!(list.count_of_length(5), 2);
    }
}
