use crate::models::{GameStatus, GuessResult, LetterFeedback, MAX_ATTEMPTS};

/// Score `guess` against `answer` with Wordle rules.
///
/// Exact matches are taken first; remaining guess letters then claim the
/// leftmost unclaimed answer position holding the same letter. A letter is
/// therefore never credited more often than the answer contains it.
/// Callers guarantee both words have the same length.
pub fn evaluate_guess(guess: &str, answer: &str, attempts_used: usize) -> GuessResult {
    let guess = guess.to_lowercase();
    let answer = answer.to_lowercase();
    let guess_chars: Vec<char> = guess.chars().collect();
    let answer_chars: Vec<char> = answer.chars().collect();

    let mut feedback = vec![LetterFeedback::Absent; answer_chars.len()];
    let mut consumed = vec![false; answer_chars.len()];

    for (i, (g, a)) in guess_chars.iter().zip(&answer_chars).enumerate() {
        if g == a {
            feedback[i] = LetterFeedback::Correct;
            consumed[i] = true;
        }
    }

    for (i, g) in guess_chars.iter().enumerate().take(answer_chars.len()) {
        if feedback[i] == LetterFeedback::Correct {
            continue;
        }
        if let Some(j) = (0..answer_chars.len()).find(|&j| !consumed[j] && answer_chars[j] == *g) {
            feedback[i] = LetterFeedback::Present;
            consumed[j] = true;
        }
    }

    let attempts_used = attempts_used + 1;
    let is_correct = guess == answer;
    let attempts_remaining = MAX_ATTEMPTS.saturating_sub(attempts_used);
    let game_status = if is_correct {
        GameStatus::Solved
    } else if attempts_remaining == 0 {
        GameStatus::Failed
    } else {
        GameStatus::Playing
    };

    GuessResult {
        feedback,
        is_correct,
        attempts_used,
        attempts_remaining,
        game_status,
        answer: (game_status == GameStatus::Solved).then_some(answer),
    }
}
