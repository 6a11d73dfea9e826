use crate::utils::{CONSONANTS, VOWELS};

/// Split the alphabet into vowel and consonant pools, leaving out `exclude`.
pub fn letter_pools(exclude: char) -> (Vec<char>, Vec<char>) {
    let exclude = exclude.to_ascii_lowercase();
    let vowels: Vec<char> = VOWELS.iter().copied().filter(|&v| v != exclude).collect();
    let consonants: Vec<char> = CONSONANTS.iter().copied().filter(|&c| c != exclude).collect();

    (vowels, consonants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_pools_exclude_vowel() {
        let (vowels, consonants) = letter_pools('e');
        assert_eq!(vowels, vec!['a', 'i', 'o', 'u']);
        assert_eq!(consonants.len(), 21);
    }

    #[test]
    fn test_letter_pools_exclude_consonant() {
        let (vowels, consonants) = letter_pools('Q');
        assert_eq!(vowels.len(), 5);
        assert_eq!(consonants.len(), 20);
        assert!(!consonants.contains(&'q'));
    }
}
