use chrono::{DateTime, Utc};
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{GameError, StoreError};
use crate::models::{
    AchievementId, ClientPuzzleView, Difficulty, GameSession, GameStatus, GuessResult,
    LeaderboardEntry, PostMeta, UserStats,
};
use crate::services::difficulty::tier_for_streak;
use crate::services::evaluator::evaluate_guess;
use crate::services::generator::generate_puzzle;
use crate::services::progress::{apply_fail, apply_solve};
use crate::services::view::project_puzzle;
use crate::store::{
    Dictionary, Leaderboard, MemoryStore, PuzzleStore, RankedScore, SessionStore, StatsStore,
    UserDirectory,
};
use crate::utils::{is_playable_word, normalize_word};

pub const BOT_NAME: &str = "Lock Bot";
pub const ANONYMOUS: &str = "Anonymous";
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Handles to every storage collaborator.
#[derive(Clone)]
pub struct Stores {
    pub puzzles: Arc<dyn PuzzleStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub stats: Arc<dyn StatsStore>,
    pub leaderboard: Arc<dyn Leaderboard>,
    pub users: Arc<dyn UserDirectory>,
}

impl Stores {
    pub fn in_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            puzzles: store.clone(),
            sessions: store.clone(),
            stats: store.clone(),
            leaderboard: store.clone(),
            users: store,
        }
    }
}

/// What a player sees when opening a puzzle.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleSnapshot {
    pub puzzle: ClientPuzzleView,
    pub session: Option<GameSession>,
    pub is_creator: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessOutcome {
    #[serde(flatten)]
    pub result: GuessResult,
    pub new_achievements: Vec<AchievementId>,
}

#[derive(Debug, Serialize)]
pub struct StatsSummary {
    pub stats: UserStats,
    pub difficulty: Difficulty,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostLeaderboard {
    pub entries: Vec<LeaderboardEntry>,
    pub total_solvers: usize,
}

fn internal(err: StoreError) -> GameError {
    error!("Store failure: {}", err);
    GameError::Internal("Internal error".to_string())
}

/// Runs the game against its collaborators.
///
/// Every rejection is decided before anything is written. A store failure
/// while recording a guess leaves the session unchanged, so the guess can be
/// retried; board and stats writes that already landed are applied again on
/// that retry. Updates to a single user's session or stats are plain
/// read-modify-write; concurrent guesses by the same user on the same puzzle
/// are not serialized here.
pub struct GameService {
    stores: Stores,
    dictionary: Arc<dyn Dictionary>,
    clock: Arc<dyn Clock>,
    rng: Mutex<StdRng>,
}

impl GameService {
    pub fn new(stores: Stores, dictionary: Arc<dyn Dictionary>) -> Self {
        Self {
            stores,
            dictionary,
            clock: Arc::new(SystemClock),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    fn rng(&self) -> Result<MutexGuard<'_, StdRng>, GameError> {
        self.rng
            .lock()
            .map_err(|_| GameError::Internal("Random source unavailable".to_string()))
    }

    pub fn identify(&self, user_id: &str, username: &str) -> Result<(), GameError> {
        self.stores.users.remember(user_id, username).map_err(internal)
    }

    /// A player-made puzzle. Always medium difficulty.
    pub fn create_custom_puzzle(
        &self,
        creator_id: &str,
        creator_name: &str,
        word: &str,
    ) -> Result<String, GameError> {
        let word = normalize_word(word);
        if word.is_empty() {
            return Err(GameError::Validation("word is required".to_string()));
        }
        if !is_playable_word(&word) {
            return Err(GameError::Validation("Word must be 3-6 letters".to_string()));
        }
        if !self.dictionary.contains(&word) {
            return Err(GameError::Validation(format!("\"{}\" is not in the dictionary", word)));
        }

        let meta = PostMeta {
            creator_id: Some(creator_id.to_string()),
            creator_name: creator_name.to_string(),
            created_at: self.clock.now(),
            is_daily: false,
            word_length: word.len(),
        };
        self.publish(&word, Difficulty::Medium, meta)
    }

    pub fn create_daily_puzzle(&self, length: usize) -> Result<String, GameError> {
        let word = self.random_word(length)?;
        self.publish(&word, Difficulty::Medium, self.bot_meta(length, true))
    }

    pub fn create_welcome_puzzle(&self, length: usize) -> Result<String, GameError> {
        let word = self.random_word(length)?;
        self.publish(&word, Difficulty::Easy, self.bot_meta(length, false))
    }

    fn bot_meta(&self, length: usize, is_daily: bool) -> PostMeta {
        PostMeta {
            creator_id: None,
            creator_name: BOT_NAME.to_string(),
            created_at: self.clock.now(),
            is_daily,
            word_length: length,
        }
    }

    fn random_word(&self, length: usize) -> Result<String, GameError> {
        let mut rng = self.rng()?;
        self.dictionary
            .random_word_of_length(length, &mut *rng)
            .map_err(|e| GameError::NotFound(e.to_string()))
    }

    fn publish(
        &self,
        answer: &str,
        difficulty: Difficulty,
        meta: PostMeta,
    ) -> Result<String, GameError> {
        let (puzzle_id, config) = {
            let mut rng = self.rng()?;
            let puzzle_id = format!("p{:012x}", rng.gen::<u64>() & 0xffff_ffff_ffff);
            (puzzle_id, generate_puzzle(answer, difficulty, &mut *rng))
        };

        self.stores.puzzles.save(&puzzle_id, &config).map_err(internal)?;
        self.stores.puzzles.save_meta(&puzzle_id, &meta).map_err(internal)?;

        info!(
            "Created {} puzzle {} ({} letters) by {}",
            difficulty, puzzle_id, config.word_length, meta.creator_name
        );
        Ok(puzzle_id)
    }

    pub fn load_puzzle(
        &self,
        puzzle_id: &str,
        user_id: Option<&str>,
    ) -> Result<PuzzleSnapshot, GameError> {
        let config = self
            .stores
            .puzzles
            .load(puzzle_id)
            .map_err(internal)?
            .ok_or_else(|| GameError::NotFound("Puzzle not found".to_string()))?;
        let meta = self.stores.puzzles.load_meta(puzzle_id).map_err(internal)?;

        let (creator_name, is_daily, creator_id) = match &meta {
            Some(m) => (m.creator_name.as_str(), m.is_daily, m.creator_id.as_deref()),
            None => ("Unknown", false, None),
        };

        let session = match user_id {
            Some(uid) => self.stores.sessions.load(uid, puzzle_id).map_err(internal)?,
            None => None,
        };

        Ok(PuzzleSnapshot {
            puzzle: project_puzzle(&config, creator_name, is_daily),
            session,
            is_creator: user_id.is_some() && user_id == creator_id,
        })
    }

    pub fn submit_guess(
        &self,
        puzzle_id: &str,
        user_id: &str,
        guess: &str,
    ) -> Result<GuessOutcome, GameError> {
        let guess = normalize_word(guess);
        if guess.is_empty() {
            return Err(GameError::Validation("guess is required".to_string()));
        }

        let config = self
            .stores
            .puzzles
            .load(puzzle_id)
            .map_err(internal)?
            .ok_or_else(|| GameError::NotFound("Puzzle not found".to_string()))?;

        if guess.chars().count() != config.word_length {
            return Err(GameError::Validation(format!(
                "Guess must be {} letters",
                config.word_length
            )));
        }

        let mut session = match self.stores.sessions.load(user_id, puzzle_id).map_err(internal)? {
            Some(session) => {
                if let Err(e) = session.ensure_playable() {
                    warn!("Rejected guess from {} on {}: {}", user_id, puzzle_id, e);
                    return Err(e);
                }
                session
            }
            None => {
                let meta = self.stores.puzzles.load_meta(puzzle_id).map_err(internal)?;
                if meta.and_then(|m| m.creator_id).as_deref() == Some(user_id) {
                    return Err(GameError::CreatorCannotPlay);
                }
                GameSession::default()
            }
        };

        let result = evaluate_guess(&guess, &config.answer, session.attempts_used);
        session.record(&guess, &result)?;

        // The session is written last so a failed board or stats write leaves
        // it playable and the same guess can be sent again.
        let mut new_achievements = Vec::new();
        match result.game_status {
            GameStatus::Solved => {
                self.stores
                    .leaderboard
                    .record_post_result(puzzle_id, user_id, result.attempts_used)
                    .map_err(internal)?;

                let stats = self.stores.stats.load(user_id).map_err(internal)?;
                let (stats, unlocked) = apply_solve(stats, result.attempts_used, self.clock.now());
                self.stores.stats.save(user_id, &stats).map_err(internal)?;
                self.stores.leaderboard.increment_global_solve(user_id).map_err(internal)?;

                info!(
                    "{} solved {} in {} (streak {})",
                    user_id, puzzle_id, result.attempts_used, stats.current_streak
                );
                if !unlocked.is_empty() {
                    info!("{} unlocked {:?}", user_id, unlocked);
                }
                new_achievements = unlocked;
            }
            GameStatus::Failed => {
                let stats = self.stores.stats.load(user_id).map_err(internal)?;
                self.stores.stats.save(user_id, &apply_fail(stats)).map_err(internal)?;
                info!("{} ran out of attempts on {}", user_id, puzzle_id);
            }
            GameStatus::Playing => {}
        }
        self.stores.sessions.save(user_id, puzzle_id, &session).map_err(internal)?;

        Ok(GuessOutcome { result, new_achievements })
    }

    pub fn user_stats(&self, user_id: &str) -> Result<StatsSummary, GameError> {
        let stats = self.stores.stats.load(user_id).map_err(internal)?;
        let difficulty = tier_for_streak(stats.current_streak);
        Ok(StatsSummary { stats, difficulty })
    }

    pub fn post_leaderboard(
        &self,
        puzzle_id: &str,
        limit: usize,
    ) -> Result<PostLeaderboard, GameError> {
        let top = self.stores.leaderboard.top_for_post(puzzle_id, limit).map_err(internal)?;
        let total_solvers = self.stores.leaderboard.post_solver_count(puzzle_id).map_err(internal)?;
        Ok(PostLeaderboard {
            entries: self.named(top),
            total_solvers,
        })
    }

    pub fn global_leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, GameError> {
        let top = self.stores.leaderboard.top_global(limit).map_err(internal)?;
        Ok(self.named(top))
    }

    /// Attach display names and 1-based ranks. Lookup failures fall back to "Anonymous".
    fn named(&self, scores: Vec<RankedScore>) -> Vec<LeaderboardEntry> {
        scores
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                let username = match self.stores.users.username(&entry.user_id) {
                    Ok(Some(name)) => name,
                    Ok(None) => ANONYMOUS.to_string(),
                    Err(e) => {
                        warn!("User lookup failed for {}: {}", entry.user_id, e);
                        ANONYMOUS.to_string()
                    }
                };
                LeaderboardEntry {
                    username,
                    score: entry.score,
                    rank: i + 1,
                }
            })
            .collect()
    }

    pub fn validate_word(&self, word: &str) -> bool {
        let word = normalize_word(word);
        !word.is_empty() && self.dictionary.contains(&word)
    }
}
