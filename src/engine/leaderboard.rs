//! XP leaderboard

use serde::Serialize;

use crate::engine::levels::Level;

/// One profile's standing as read from the profile store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub user_id: String,
    pub username: String,
    pub xp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based
    pub rank: usize,
    pub user_id: String,
    pub username: String,
    pub xp: u64,
    pub level: u64,
}

/// Order by XP descending, ties by username, and assign sequential ranks
pub fn rank(mut standings: Vec<Standing>, limit: usize) -> Vec<LeaderboardEntry> {
    standings.sort_by(|a, b| b.xp.cmp(&a.xp).then_with(|| a.username.cmp(&b.username)));
    standings
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, s)| LeaderboardEntry {
            rank: i + 1,
            level: Level::for_xp(s.xp).level,
            user_id: s.user_id,
            username: s.username,
            xp: s.xp,
        })
        .collect()
}
