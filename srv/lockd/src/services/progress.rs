use chrono::{DateTime, Utc};

use crate::models::{AchievementId, UserStats};
use crate::utils::epoch_day;

/// Fold a solve into `stats`.
///
/// Returns the new snapshot together with the achievements this solve
/// unlocked. Achievements already held are never reported twice.
pub fn apply_solve(
    mut stats: UserStats,
    attempts_used: usize,
    now: DateTime<Utc>,
) -> (UserStats, Vec<AchievementId>) {
    stats.total_solved += 1;
    stats.total_played += 1;

    if let Some(bucket) = attempts_used
        .checked_sub(1)
        .and_then(|i| stats.attempt_distribution.get_mut(i))
    {
        *bucket += 1;
    }

    let today = epoch_day(now);
    match stats.last_solve_date.map(epoch_day) {
        Some(last) if last == today => {}
        Some(last) if today - last == 1 => stats.current_streak += 1,
        _ => stats.current_streak = 1,
    }
    stats.best_streak = stats.best_streak.max(stats.current_streak);
    stats.last_solve_date = Some(now);

    let mut unlocked = Vec::new();
    for id in AchievementId::ALL {
        if !stats.achievements.contains(&id) && is_earned(id, &stats, attempts_used) {
            stats.achievements.push(id);
            unlocked.push(id);
        }
    }

    (stats, unlocked)
}

/// Fold a failed game into `stats`. A failure always breaks the streak.
pub fn apply_fail(mut stats: UserStats) -> UserStats {
    stats.total_played += 1;
    stats.current_streak = 0;
    stats
}

fn is_earned(id: AchievementId, stats: &UserStats, attempts_used: usize) -> bool {
    match id {
        AchievementId::FirstCrack => stats.total_solved >= 1,
        AchievementId::Locksmith => stats.total_solved >= 25,
        AchievementId::LockMaster => stats.total_solved >= 50,
        AchievementId::HotStreak => stats.current_streak >= 5,
        AchievementId::Unbreakable => stats.current_streak >= 10,
        AchievementId::SpeedDemon => attempts_used == 1,
    }
}
