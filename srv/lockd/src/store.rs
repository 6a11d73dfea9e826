//! Collaborators the game service talks to.
//!
//! Each trait is a narrow contract over some external system (key-value
//! store, sorted sets, identity lookup, word list). [`MemoryStore`] backs all
//! of the storage traits with process-local maps so the service can run and
//! be tested without one; nothing it holds survives a restart.

use log::warn;
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{DictionaryError, StoreError};
use crate::models::{GameSession, PostMeta, PuzzleConfig, UserStats};

pub trait PuzzleStore: Send + Sync {
    fn load(&self, puzzle_id: &str) -> Result<Option<PuzzleConfig>, StoreError>;
    fn save(&self, puzzle_id: &str, config: &PuzzleConfig) -> Result<(), StoreError>;
    fn load_meta(&self, puzzle_id: &str) -> Result<Option<PostMeta>, StoreError>;
    fn save_meta(&self, puzzle_id: &str, meta: &PostMeta) -> Result<(), StoreError>;
}

pub trait SessionStore: Send + Sync {
    fn load(&self, user_id: &str, puzzle_id: &str) -> Result<Option<GameSession>, StoreError>;
    fn save(&self, user_id: &str, puzzle_id: &str, session: &GameSession) -> Result<(), StoreError>;
}

pub trait StatsStore: Send + Sync {
    /// Unknown users start from [`UserStats::default`].
    fn load(&self, user_id: &str) -> Result<UserStats, StoreError>;
    fn save(&self, user_id: &str, stats: &UserStats) -> Result<(), StoreError>;
}

pub trait Dictionary: Send + Sync {
    fn contains(&self, word: &str) -> bool;
    fn random_word_of_length(
        &self,
        length: usize,
        rng: &mut dyn RngCore,
    ) -> Result<String, DictionaryError>;
}

/// A member and its score on a sorted board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedScore {
    pub user_id: String,
    pub score: u32,
}

pub trait Leaderboard: Send + Sync {
    /// Score is attempts used; lower ranks higher.
    fn record_post_result(
        &self,
        puzzle_id: &str,
        user_id: &str,
        attempts: usize,
    ) -> Result<(), StoreError>;
    fn increment_global_solve(&self, user_id: &str) -> Result<(), StoreError>;
    fn top_for_post(&self, puzzle_id: &str, limit: usize) -> Result<Vec<RankedScore>, StoreError>;
    /// Most solves first.
    fn top_global(&self, limit: usize) -> Result<Vec<RankedScore>, StoreError>;
    fn post_solver_count(&self, puzzle_id: &str) -> Result<usize, StoreError>;
}

pub trait UserDirectory: Send + Sync {
    fn username(&self, user_id: &str) -> Result<Option<String>, StoreError>;
    fn remember(&self, user_id: &str, username: &str) -> Result<(), StoreError>;
}

fn puzzle_config_key(puzzle_id: &str) -> String {
    format!("puzzle:{}:config", puzzle_id)
}

fn puzzle_meta_key(puzzle_id: &str) -> String {
    format!("puzzle:{}:meta", puzzle_id)
}

fn session_key(user_id: &str, puzzle_id: &str) -> String {
    format!("session:{}:{}", user_id, puzzle_id)
}

fn user_stats_key(user_id: &str) -> String {
    format!("user:{}:stats", user_id)
}

/// Volatile implementation of every storage trait.
///
/// Records are kept as JSON blobs, so a load always hands out a fresh
/// snapshot and a save replaces the whole value.
#[derive(Default)]
pub struct MemoryStore {
    blobs: RwLock<HashMap<String, String>>,
    post_boards: RwLock<HashMap<String, HashMap<String, u32>>>,
    global_board: RwLock<HashMap<String, u32>>,
    usernames: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let blobs = self.blobs.read().map_err(|_| StoreError::Poisoned)?;
        match blobs.get(key) {
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|source| StoreError::Corrupt { key: key.to_string(), source }),
            None => Ok(None),
        }
    }

    fn put_json<T: Serialize>(&self, key: String, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)
            .map_err(|source| StoreError::Encode { key: key.clone(), source })?;
        self.blobs.write().map_err(|_| StoreError::Poisoned)?.insert(key, raw);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn put_raw(&self, key: &str, raw: &str) {
        self.blobs.write().unwrap().insert(key.to_string(), raw.to_string());
    }
}

/// Highest score first when `descending`, ties broken by member id.
fn ranked(board: &HashMap<String, u32>, descending: bool, limit: usize) -> Vec<RankedScore> {
    let mut entries: Vec<RankedScore> = board
        .iter()
        .map(|(user_id, &score)| RankedScore { user_id: user_id.clone(), score })
        .collect();
    entries.sort_by(|a, b| {
        let by_score = if descending { b.score.cmp(&a.score) } else { a.score.cmp(&b.score) };
        by_score.then_with(|| a.user_id.cmp(&b.user_id))
    });
    entries.truncate(limit);
    entries
}

impl PuzzleStore for MemoryStore {
    fn load(&self, puzzle_id: &str) -> Result<Option<PuzzleConfig>, StoreError> {
        self.get_json(&puzzle_config_key(puzzle_id))
    }

    fn save(&self, puzzle_id: &str, config: &PuzzleConfig) -> Result<(), StoreError> {
        self.put_json(puzzle_config_key(puzzle_id), config)
    }

    fn load_meta(&self, puzzle_id: &str) -> Result<Option<PostMeta>, StoreError> {
        self.get_json(&puzzle_meta_key(puzzle_id))
    }

    fn save_meta(&self, puzzle_id: &str, meta: &PostMeta) -> Result<(), StoreError> {
        self.put_json(puzzle_meta_key(puzzle_id), meta)
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, user_id: &str, puzzle_id: &str) -> Result<Option<GameSession>, StoreError> {
        self.get_json(&session_key(user_id, puzzle_id))
    }

    fn save(
        &self,
        user_id: &str,
        puzzle_id: &str,
        session: &GameSession,
    ) -> Result<(), StoreError> {
        self.put_json(session_key(user_id, puzzle_id), session)
    }
}

impl StatsStore for MemoryStore {
    fn load(&self, user_id: &str) -> Result<UserStats, StoreError> {
        match self.get_json(&user_stats_key(user_id)) {
            Ok(stats) => Ok(stats.unwrap_or_default()),
            Err(StoreError::Corrupt { key, source }) => {
                warn!("Discarding unreadable stats at {}: {}", key, source);
                Ok(UserStats::default())
            }
            Err(e) => Err(e),
        }
    }

    fn save(&self, user_id: &str, stats: &UserStats) -> Result<(), StoreError> {
        self.put_json(user_stats_key(user_id), stats)
    }
}

impl Leaderboard for MemoryStore {
    fn record_post_result(
        &self,
        puzzle_id: &str,
        user_id: &str,
        attempts: usize,
    ) -> Result<(), StoreError> {
        let mut boards = self.post_boards.write().map_err(|_| StoreError::Poisoned)?;
        let score = u32::try_from(attempts).unwrap_or(u32::MAX);
        boards
            .entry(puzzle_id.to_string())
            .or_default()
            .insert(user_id.to_string(), score);
        Ok(())
    }

    fn increment_global_solve(&self, user_id: &str) -> Result<(), StoreError> {
        let mut board = self.global_board.write().map_err(|_| StoreError::Poisoned)?;
        *board.entry(user_id.to_string()).or_insert(0) += 1;
        Ok(())
    }

    fn top_for_post(&self, puzzle_id: &str, limit: usize) -> Result<Vec<RankedScore>, StoreError> {
        let boards = self.post_boards.read().map_err(|_| StoreError::Poisoned)?;
        Ok(boards
            .get(puzzle_id)
            .map(|board| ranked(board, false, limit))
            .unwrap_or_default())
    }

    fn top_global(&self, limit: usize) -> Result<Vec<RankedScore>, StoreError> {
        let board = self.global_board.read().map_err(|_| StoreError::Poisoned)?;
        Ok(ranked(&board, true, limit))
    }

    fn post_solver_count(&self, puzzle_id: &str) -> Result<usize, StoreError> {
        let boards = self.post_boards.read().map_err(|_| StoreError::Poisoned)?;
        Ok(boards.get(puzzle_id).map(HashMap::len).unwrap_or(0))
    }
}

impl UserDirectory for MemoryStore {
    fn username(&self, user_id: &str) -> Result<Option<String>, StoreError> {
        let names = self.usernames.read().map_err(|_| StoreError::Poisoned)?;
        Ok(names.get(user_id).cloned())
    }

    fn remember(&self, user_id: &str, username: &str) -> Result<(), StoreError> {
        let mut names = self.usernames.write().map_err(|_| StoreError::Poisoned)?;
        names.insert(user_id.to_string(), username.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GameStatus;

    #[test]
    fn test_stats_default_when_absent_or_corrupt() {
        let store = MemoryStore::new();
        assert_eq!(StatsStore::load(&store, "u1").unwrap(), UserStats::default());

        store.put_raw("user:u1:stats", "{not json");
        assert_eq!(StatsStore::load(&store, "u1").unwrap(), UserStats::default());
    }

    #[test]
    fn test_session_round_trip_is_a_snapshot() {
        let store = MemoryStore::new();
        let mut session = GameSession::default();
        SessionStore::save(&store, "u1", "p1", &session).unwrap();

        session.status = GameStatus::Solved;
        let loaded = SessionStore::load(&store, "u1", "p1").unwrap().unwrap();
        assert_eq!(loaded.status, GameStatus::Playing);
        assert!(SessionStore::load(&store, "u2", "p1").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_session_is_an_error() {
        let store = MemoryStore::new();
        store.put_raw("session:u1:p1", "[]");
        assert!(matches!(
            SessionStore::load(&store, "u1", "p1"),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_post_board_orders_by_fewest_attempts() {
        let store = MemoryStore::new();
        store.record_post_result("p1", "carol", 4).unwrap();
        store.record_post_result("p1", "alice", 2).unwrap();
        store.record_post_result("p1", "bob", 2).unwrap();
        store.record_post_result("p2", "dave", 1).unwrap();

        let top = store.top_for_post("p1", 10).unwrap();
        let order: Vec<&str> = top.iter().map(|e| e.user_id.as_str()).collect();
        assert_eq!(order, vec!["alice", "bob", "carol"]);
        assert_eq!(store.post_solver_count("p1").unwrap(), 3);
        assert_eq!(store.top_for_post("p1", 1).unwrap().len(), 1);
        assert!(store.top_for_post("missing", 10).unwrap().is_empty());
    }

    #[test]
    fn test_global_board_orders_by_most_solves() {
        let store = MemoryStore::new();
        store.increment_global_solve("alice").unwrap();
        store.increment_global_solve("bob").unwrap();
        store.increment_global_solve("bob").unwrap();

        let top = store.top_global(10).unwrap();
        assert_eq!(top[0], RankedScore { user_id: "bob".into(), score: 2 });
        assert_eq!(top[1], RankedScore { user_id: "alice".into(), score: 1 });
    }
}
