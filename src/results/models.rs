use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::GamePlayerStats;

/// Stored outcome of resolving one game: the canonical stat lines it
/// was scored from and the team bonus everyone shared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub id: String,
    pub game_id: String,
    pub player_stats: Vec<GamePlayerStats>,
    pub team_points: i32,
    pub completed_at: DateTime<Utc>,
}

/// One user's running season total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonScore {
    pub user_id: String,
    pub points: i32,
}
