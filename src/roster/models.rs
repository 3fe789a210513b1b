use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::EnumIter;

/// Position code as rosters and box scores report it.
///
/// Feeds are inconsistent about wing codes: some emit `LW`/`RW`, others the
/// bare `L`/`R`. Parsing collapses the single-letter aliases onto the full
/// codes. A code we have never seen maps to `Unknown` and scores zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Center,
    LeftWing,
    RightWing,
    Defense,
    Goalie,
    /// Unrecognized code, kept verbatim for logging.
    Unknown(String),
}

impl Position {
    /// Parses a raw feed code, collapsing the single-letter wing aliases.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "C" => Position::Center,
            "LW" | "L" => Position::LeftWing,
            "RW" | "R" => Position::RightWing,
            "D" => Position::Defense,
            "G" => Position::Goalie,
            _ => Position::Unknown(code.to_string()),
        }
    }

    /// Scoring group this position dispatches to; `None` when no rule covers it.
    pub fn role(&self) -> Option<ScoringRole> {
        match self {
            Position::Center | Position::LeftWing | Position::RightWing => {
                Some(ScoringRole::Forward)
            }
            Position::Defense => Some(ScoringRole::Defense),
            Position::Goalie => Some(ScoringRole::Goalie),
            Position::Unknown(_) => None,
        }
    }

    /// Canonical feed code for this position.
    pub fn code(&self) -> &str {
        match self {
            Position::Center => "C",
            Position::LeftWing => "LW",
            Position::RightWing => "RW",
            Position::Defense => "D",
            Position::Goalie => "G",
            Position::Unknown(code) => code,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Scoring groups the point rules dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum ScoringRole {
    Forward,
    Defense,
    Goalie,
}

impl fmt::Display for ScoringRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScoringRole::Forward => "forward",
            ScoringRole::Defense => "defense",
            ScoringRole::Goalie => "goalie",
        };
        write!(f, "{}", label)
    }
}

/// A roster member as supplied by the roster collaborator.
///
/// Immutable for the duration of a scoring pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub number: Option<u32>, // sweater number, not always published
    pub position: Position,
    /// Numeric id used by external stat feeds, when known.
    pub external_id: Option<i64>,
    pub active: bool,
}

impl Player {
    /// Last token of the display name, used as the weakest matching key.
    pub fn last_name(&self) -> &str {
        self.name.split_whitespace().last().unwrap_or(&self.name)
    }
}

/// Roster bucketed by scoring group, the shape the simulator draws from.
#[derive(Debug, Clone, Default)]
pub struct RosterGroups {
    pub forwards: Vec<Player>,
    pub defensemen: Vec<Player>,
    pub goalies: Vec<Player>,
}

impl RosterGroups {
    pub fn from_players(players: &[Player]) -> Self {
        let mut groups = Self::default();
        for player in players {
            match player.position.role() {
                Some(ScoringRole::Forward) => groups.forwards.push(player.clone()),
                Some(ScoringRole::Defense) => groups.defensemen.push(player.clone()),
                Some(ScoringRole::Goalie) => groups.goalies.push(player.clone()),
                // Unknown positions cannot score, so the simulator never drafts them
                None => {}
            }
        }
        groups
    }

    pub fn is_empty(&self) -> bool {
        self.forwards.is_empty() && self.defensemen.is_empty() && self.goalies.is_empty()
    }
}
