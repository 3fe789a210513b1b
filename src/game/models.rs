use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::EnumIter;

/// Minutes before puck drop at which picks freeze.
pub const LOCK_LEAD_MINUTES: i64 = 30;

/// Lifecycle of a game record.
///
/// External schedule feeds say "scheduled"/"final"; the simulated slate uses
/// "upcoming"/"completed" for the same states, so those spellings are
/// accepted on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[serde(alias = "upcoming")]
    Scheduled,
    #[serde(alias = "live")]
    InProgress,
    #[serde(alias = "completed")]
    Final,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameStatus::Scheduled => "scheduled",
            GameStatus::InProgress => "in_progress",
            GameStatus::Final => "final",
        };
        write!(f, "{}", label)
    }
}

/// Final score and situational flags written when a game goes final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub team_goals: u32,
    pub opponent_goals: u32,
    pub went_to_overtime: bool,
    pub shootout_occurred: bool,
    /// Opponent goals scored into our vacated net; excluded from the
    /// goalie's goals-against.
    pub empty_net_goals: u32,
}

/// One game on the tracked team's schedule.
///
/// Status and score fields are write-once: they change only when the game is
/// finalized, and stay frozen afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    /// Gamecenter id used by external feeds, when known.
    pub external_id: Option<i64>,
    pub opponent: String,
    pub starts_at: DateTime<Utc>,
    pub is_home: bool,
    pub status: GameStatus,
    pub team_goals: u32,
    pub opponent_goals: u32,
    pub went_to_overtime: bool,
    pub shootout_occurred: bool,
    pub empty_net_goals: u32,
}

impl Game {
    /// Creates a scheduled game with zeroed score fields.
    pub fn scheduled(id: String, opponent: String, starts_at: DateTime<Utc>, is_home: bool) -> Self {
        Self {
            id,
            external_id: None,
            opponent,
            starts_at,
            is_home,
            status: GameStatus::Scheduled,
            team_goals: 0,
            opponent_goals: 0,
            went_to_overtime: false,
            shootout_occurred: false,
            empty_net_goals: 0,
        }
    }

    /// The moment picks for this game freeze.
    pub fn lock_time(&self) -> DateTime<Utc> {
        self.starts_at - Duration::minutes(LOCK_LEAD_MINUTES)
    }

    /// Whether picks may still be created or deleted at `now`.
    pub fn picks_open(&self, now: DateTime<Utc>) -> bool {
        self.status == GameStatus::Scheduled && now < self.lock_time()
    }

    pub fn is_final(&self) -> bool {
        self.status == GameStatus::Final
    }

    /// Writes the final outcome and flips the status to final.
    pub fn apply_outcome(&mut self, outcome: &GameOutcome) {
        self.team_goals = outcome.team_goals;
        self.opponent_goals = outcome.opponent_goals;
        self.went_to_overtime = outcome.went_to_overtime;
        self.shootout_occurred = outcome.shootout_occurred;
        self.empty_net_goals = outcome.empty_net_goals;
        self.status = GameStatus::Final;
    }

    /// The recorded outcome of a final game.
    pub fn outcome(&self) -> GameOutcome {
        GameOutcome {
            team_goals: self.team_goals,
            opponent_goals: self.opponent_goals,
            went_to_overtime: self.went_to_overtime,
            shootout_occurred: self.shootout_occurred,
            empty_net_goals: self.empty_net_goals,
        }
    }
}
