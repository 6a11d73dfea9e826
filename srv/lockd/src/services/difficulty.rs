use crate::models::Difficulty;

pub const EASY_MAX_STREAK: u32 = 2;
pub const MEDIUM_MAX_STREAK: u32 = 5;

/// Ring layout for a difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingParams {
    /// Letters offered on every unfixed ring.
    pub ring_size: usize,
    /// Rings revealed up front.
    pub fixed_count: usize,
}

pub fn tier_for_streak(streak: u32) -> Difficulty {
    if streak <= EASY_MAX_STREAK {
        Difficulty::Easy
    } else if streak <= MEDIUM_MAX_STREAK {
        Difficulty::Medium
    } else {
        Difficulty::Hard
    }
}

pub fn params_for_tier(tier: Difficulty) -> RingParams {
    match tier {
        Difficulty::Easy => RingParams { ring_size: 6, fixed_count: 2 },
        Difficulty::Medium => RingParams { ring_size: 8, fixed_count: 1 },
        Difficulty::Hard => RingParams { ring_size: 10, fixed_count: 0 },
    }
}
