use crate::models::{ClientPuzzleView, ClientRingView, PuzzleConfig};

/// Strip secrets from a puzzle before it leaves the server.
///
/// Only fixed rings name their letter. Unfixed rings pass their letters
/// through in stored order, which was shuffled at generation time.
pub fn project_puzzle(
    config: &PuzzleConfig,
    creator_name: &str,
    is_daily: bool,
) -> ClientPuzzleView {
    let rings = config
        .rings
        .iter()
        .map(|ring| {
            if ring.is_fixed {
                let letter = ring.correct_letter();
                ClientRingView {
                    letters: letter.into_iter().collect(),
                    is_fixed: true,
                    fixed_letter: letter,
                }
            } else {
                ClientRingView {
                    letters: ring.letters.clone(),
                    is_fixed: false,
                    fixed_letter: None,
                }
            }
        })
        .collect();

    ClientPuzzleView {
        word_length: config.word_length,
        rings,
        fixed_indices: config.fixed_indices.clone(),
        difficulty: config.difficulty,
        creator_name: creator_name.to_string(),
        is_daily,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;
    use crate::services::generator::generate_puzzle;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fixed_rings_reveal_letter() {
        let config = generate_puzzle("crane", Difficulty::Easy, &mut StdRng::seed_from_u64(5));
        let view = project_puzzle(&config, "alice", true);

        assert_eq!(view.word_length, 5);
        assert_eq!(view.fixed_indices, config.fixed_indices);
        assert_eq!(view.creator_name, "alice");
        assert!(view.is_daily);

        let answer: Vec<char> = "crane".chars().collect();
        for (i, ring) in view.rings.iter().enumerate() {
            if config.fixed_indices.contains(&i) {
                assert!(ring.is_fixed);
                assert_eq!(ring.letters, vec![answer[i]]);
                assert_eq!(ring.fixed_letter, Some(answer[i]));
            } else {
                assert!(!ring.is_fixed);
                assert_eq!(ring.fixed_letter, None);
                assert_eq!(ring.letters, config.rings[i].letters);
            }
        }
    }

    #[test]
    fn test_view_never_carries_answer_or_index() {
        let mut config = generate_puzzle("lock", Difficulty::Hard, &mut StdRng::seed_from_u64(8));
        let before = serde_json::to_string(&project_puzzle(&config, "bob", false)).unwrap();

        assert!(!before.contains("correctIndex"));
        assert!(!before.contains("lock"));

        // Moving the secret index on an unfixed ring must not change the view.
        config.answer = "zzzz".to_string();
        for ring in config.rings.iter_mut() {
            ring.correct_index = (ring.correct_index + 1) % ring.letters.len();
        }
        let after = serde_json::to_string(&project_puzzle(&config, "bob", false)).unwrap();
        assert_eq!(before, after);
    }
}
