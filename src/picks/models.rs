use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

use crate::game::Game;

/// What a user staked their pick on.
///
/// Stored as a single string: a roster player id, or the reserved word
/// `"team"` for the collective goal bonus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Player(String),
    Team,
}

impl Selection {
    pub const TEAM_SENTINEL: &'static str = "team";

    pub fn from_raw(raw: String) -> Self {
        if raw.eq_ignore_ascii_case(Self::TEAM_SENTINEL) {
            Selection::Team
        } else {
            Selection::Player(raw)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selection::Player(id) => id,
            Selection::Team => Self::TEAM_SENTINEL,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Selection::from_raw(String::deserialize(deserializer)?))
    }
}

/// One user's pick for one game in one league.
///
/// `points_earned` stays zero until the game is resolved. `locked_at`
/// is stamped when the pick window closes, never cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pick {
    pub id: String,
    pub user_id: String,
    pub league_id: String,
    pub game_id: String,
    pub selection: Selection,
    pub points_earned: i32,
    pub picked_at: DateTime<Utc>,
    pub locked_at: Option<DateTime<Utc>>,
}

impl Pick {
    pub fn new(user_id: String, league_id: String, game_id: String, selection: Selection) -> Self {
        Pick {
            id: Uuid::new_v4().to_string(),
            user_id,
            league_id,
            game_id,
            selection,
            points_earned: 0,
            picked_at: Utc::now(),
            locked_at: None,
        }
    }
}

/// Lifecycle phase of a pick, derived from its game rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickWindow {
    /// Changes allowed until the lock time.
    Open,
    /// Frozen; the game has started or is about to.
    Locked,
    /// The game was scored and points are on the pick.
    Resolved,
}

impl PickWindow {
    /// `resolved` is whether a stored result exists for the game. A final
    /// game whose result has not landed yet still reads as locked.
    pub fn derive(game: &Game, resolved: bool, now: DateTime<Utc>) -> Self {
        if resolved && game.is_final() {
            PickWindow::Resolved
        } else if game.picks_open(now) {
            PickWindow::Open
        } else {
            PickWindow::Locked
        }
    }
}

impl fmt::Display for PickWindow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            PickWindow::Open => "open",
            PickWindow::Locked => "locked",
            PickWindow::Resolved => "resolved",
        };
        write!(f, "{}", label)
    }
}
