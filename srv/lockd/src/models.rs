use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GameError;
use crate::services::game::GameService;

pub const MAX_ATTEMPTS: usize = 6;
pub const MIN_WORD_LENGTH: usize = 3;
pub const MAX_WORD_LENGTH: usize = 6;

/// Application state shared across all handlers
pub struct AppState {
    pub game: GameService,
    pub daily_length: usize,
    pub welcome_length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single ring on the combination lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RingConfig {
    pub letters: Vec<char>,
    /// Position of the answer's letter within `letters`. Secret for unfixed rings.
    pub correct_index: usize,
    pub is_fixed: bool,
}

impl RingConfig {
    /// A ring that only offers (and therefore reveals) its correct letter.
    pub fn fixed(letter: char) -> Self {
        Self {
            letters: vec![letter],
            correct_index: 0,
            is_fixed: true,
        }
    }

    pub fn correct_letter(&self) -> Option<char> {
        self.letters.get(self.correct_index).copied()
    }
}

/// Full puzzle configuration, kept server-side only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleConfig {
    pub answer: String,
    pub word_length: usize,
    pub rings: Vec<RingConfig>,
    pub difficulty: Difficulty,
    pub fixed_indices: Vec<usize>,
}

/// Ring data safe for the client. `fixed_letter` is only set for fixed rings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRingView {
    pub letters: Vec<char>,
    pub is_fixed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_letter: Option<char>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPuzzleView {
    pub word_length: usize,
    pub rings: Vec<ClientRingView>,
    pub fixed_indices: Vec<usize>,
    pub difficulty: Difficulty,
    pub creator_name: String,
    pub is_daily: bool,
}

/// Post-level facts that sit next to a puzzle: who made it and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    pub creator_id: Option<String>,
    pub creator_name: String,
    pub created_at: DateTime<Utc>,
    pub is_daily: bool,
    pub word_length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterFeedback {
    Correct,
    Present,
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Solved,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessResult {
    pub feedback: Vec<LetterFeedback>,
    pub is_correct: bool,
    pub attempts_used: usize,
    pub attempts_remaining: usize,
    pub game_status: GameStatus,
    /// Only present once the game is solved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

/// One player's history on one puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub attempts_used: usize,
    pub status: GameStatus,
    pub guesses: Vec<String>,
    pub feedbacks: Vec<Vec<LetterFeedback>>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            attempts_used: 0,
            status: GameStatus::Playing,
            guesses: Vec::new(),
            feedbacks: Vec::new(),
        }
    }
}

impl GameSession {
    /// Rejects guesses once the session reached a terminal status.
    pub fn ensure_playable(&self) -> Result<(), GameError> {
        match self.status {
            GameStatus::Playing => Ok(()),
            GameStatus::Solved => Err(GameError::AlreadySolved),
            GameStatus::Failed => Err(GameError::AttemptsExhausted),
        }
    }

    /// Appends an evaluated guess. Terminal sessions are left untouched.
    pub fn record(&mut self, guess: &str, result: &GuessResult) -> Result<(), GameError> {
        self.ensure_playable()?;
        self.attempts_used = result.attempts_used;
        self.status = result.game_status;
        self.guesses.push(guess.to_string());
        self.feedbacks.push(result.feedback.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstCrack,
    Locksmith,
    LockMaster,
    HotStreak,
    Unbreakable,
    SpeedDemon,
}

impl AchievementId {
    pub const ALL: [AchievementId; 6] = [
        AchievementId::FirstCrack,
        AchievementId::Locksmith,
        AchievementId::LockMaster,
        AchievementId::HotStreak,
        AchievementId::Unbreakable,
        AchievementId::SpeedDemon,
    ];
}

#[derive(Debug, Clone, Serialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const ACHIEVEMENTS: [Achievement; 6] = [
    Achievement {
        id: AchievementId::FirstCrack,
        name: "First Crack",
        description: "Solve your first puzzle",
        icon: "unlock",
    },
    Achievement {
        id: AchievementId::Locksmith,
        name: "Locksmith",
        description: "Solve 25 puzzles",
        icon: "key",
    },
    Achievement {
        id: AchievementId::LockMaster,
        name: "Lock Master",
        description: "Solve 50 puzzles",
        icon: "crown",
    },
    Achievement {
        id: AchievementId::HotStreak,
        name: "Hot Streak",
        description: "5-day solve streak",
        icon: "flame",
    },
    Achievement {
        id: AchievementId::Unbreakable,
        name: "Unbreakable",
        description: "10-day solve streak",
        icon: "shield",
    },
    Achievement {
        id: AchievementId::SpeedDemon,
        name: "Speed Demon",
        description: "Solve on the first attempt",
        icon: "zap",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_solved: u32,
    pub total_played: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub last_solve_date: Option<DateTime<Utc>>,
    /// Index 0 counts solves in one attempt, and so on.
    pub attempt_distribution: [u32; MAX_ATTEMPTS],
    pub achievements: Vec<AchievementId>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            total_solved: 0,
            total_played: 0,
            current_streak: 0,
            best_streak: 0,
            last_solve_date: None,
            attempt_distribution: [0; MAX_ATTEMPTS],
            achievements: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u32,
    pub rank: usize,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApiResponse<T> {
    Success { data: T },
    Error { message: String },
}

#[derive(Deserialize)]
pub struct GuessRequest {
    pub guess: Option<String>,
}

#[derive(Deserialize)]
pub struct WordRequest {
    pub word: Option<String>,
}

#[derive(Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}
