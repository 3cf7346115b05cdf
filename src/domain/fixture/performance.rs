use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw counters recorded for one player in one match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceStats {
    pub goals: u32,
    pub assists: u32,
    pub yellow_cards: u32,
    pub red_card: bool,
    /// Only meaningful for goalkeepers
    pub goals_conceded: u32,
    /// Whether the player reached the appearance threshold
    pub played_minimum: bool,
}

/// One ledger entry: a player's statistics for one match
///
/// Keyed uniquely by `(player_id, match_id)`. `points` is the precomputed
/// round-score contribution and may be negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceRecord {
    pub id: Uuid,
    pub player_id: Uuid,
    pub match_id: Uuid,
    pub stats: PerformanceStats,
    pub points: i32,
}

impl PerformanceRecord {
    pub fn new(player_id: Uuid, match_id: Uuid, stats: PerformanceStats, points: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            player_id,
            match_id,
            stats,
            points,
        }
    }
}
