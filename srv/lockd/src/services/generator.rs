use log::debug;
use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::models::{Difficulty, PuzzleConfig, RingConfig};
use crate::services::difficulty::params_for_tier;
use crate::services::letter_classifier::letter_pools;
use crate::utils::is_vowel;

/// Share of each unfixed ring that should be vowels, the correct letter included.
pub const VOWEL_SHARE: f64 = 0.35;

/// Build the lock for `answer` at the given difficulty.
///
/// Fixed positions are drawn without replacement and returned sorted. Every
/// other position gets a shuffled ring of unique letters holding the correct
/// one exactly once.
pub fn generate_puzzle<R: Rng + ?Sized>(
    answer: &str,
    difficulty: Difficulty,
    rng: &mut R,
) -> PuzzleConfig {
    let answer = answer.to_lowercase();
    let letters: Vec<char> = answer.chars().collect();
    let word_length = letters.len();
    let params = params_for_tier(difficulty);

    let fixed_count = params.fixed_count.min(word_length);
    let mut fixed_indices = index::sample(rng, word_length, fixed_count).into_vec();
    fixed_indices.sort_unstable();

    let rings = letters
        .iter()
        .enumerate()
        .map(|(i, &letter)| {
            if fixed_indices.binary_search(&i).is_ok() {
                RingConfig::fixed(letter)
            } else {
                generate_ring(letter, params.ring_size, rng)
            }
        })
        .collect();

    debug!(
        "Generated {} puzzle: {} rings, fixed at {:?}",
        difficulty, word_length, fixed_indices
    );

    PuzzleConfig {
        answer,
        word_length,
        rings,
        difficulty,
        fixed_indices,
    }
}

/// An unfixed ring around `correct`, with its secret index recorded after shuffling.
pub fn generate_ring<R: Rng + ?Sized>(correct: char, ring_size: usize, rng: &mut R) -> RingConfig {
    let letters = ring_letters(correct, ring_size, rng);
    let correct_index = letters.iter().position(|&l| l == correct).unwrap_or_default();

    RingConfig {
        letters,
        correct_index,
        is_fixed: false,
    }
}

fn ring_letters<R: Rng + ?Sized>(correct: char, ring_size: usize, rng: &mut R) -> Vec<char> {
    let ring_size = ring_size.max(1);
    let target_vowels = ((ring_size as f64 * VOWEL_SHARE).floor() as usize).max(1);

    // Negative requests collapse to zero.
    let (vowel_slots, consonant_slots) = if is_vowel(correct) {
        (target_vowels.saturating_sub(1), ring_size.saturating_sub(target_vowels))
    } else {
        (target_vowels, ring_size.saturating_sub(target_vowels + 1))
    };

    let (mut vowels, mut consonants) = letter_pools(correct);
    vowels.shuffle(rng);
    consonants.shuffle(rng);

    let mut ring = vec![correct];
    for v in vowels.into_iter().take(vowel_slots) {
        if ring.len() >= ring_size {
            break;
        }
        ring.push(v);
    }
    for c in consonants.into_iter().take(consonant_slots) {
        if ring.len() >= ring_size {
            break;
        }
        ring.push(c);
    }

    if ring.len() < ring_size {
        let mut rest: Vec<char> = ('a'..='z').filter(|l| !ring.contains(l)).collect();
        rest.shuffle(rng);
        let missing = ring_size - ring.len();
        ring.extend(rest.into_iter().take(missing));
    }

    ring.shuffle(rng);
    ring
}
