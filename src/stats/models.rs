use serde::{Deserialize, Serialize};
use std::fmt;

use crate::roster::Position;

/// Identity of a stat line after roster matching.
///
/// Stat lines that match a roster player are keyed by our roster id.
/// Lines we could not match stay keyed by the upstream numeric id so
/// their production is never silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKey {
    Roster(String),
    External(i64),
}

impl StatKey {
    /// Roster id when this line matched one of our players.
    pub fn roster_id(&self) -> Option<&str> {
        match self {
            StatKey::Roster(id) => Some(id),
            StatKey::External(_) => None,
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StatKey::Roster(id) => write!(f, "{}", id),
            StatKey::External(id) => write!(f, "ext:{}", id),
        }
    }
}

/// A single goal with the flags that change its point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalEvent {
    pub is_overtime: bool,
    pub is_shorthanded: bool,
    pub is_empty_net: bool,
}

impl GoalEvent {
    pub fn regulation() -> Self {
        GoalEvent {
            is_overtime: false,
            is_shorthanded: false,
            is_empty_net: false,
        }
    }
}

/// A single assist. Assists inherit the shorthanded flag of their goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistEvent {
    pub is_shorthanded: bool,
}

impl AssistEvent {
    pub fn even_strength() -> Self {
        AssistEvent {
            is_shorthanded: false,
        }
    }
}

/// Canonical per-player line for one game: who, where they play,
/// and every goal and assist credited to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamePlayerStats {
    pub player: StatKey,
    pub name: String,
    pub position: Position,
    pub goals: Vec<GoalEvent>,
    pub assists: Vec<AssistEvent>,
}

impl GamePlayerStats {
    /// Empty line for a player who dressed but has not produced.
    pub fn zeroed(player: StatKey, name: String, position: Position) -> Self {
        GamePlayerStats {
            player,
            name,
            position,
            goals: Vec::new(),
            assists: Vec::new(),
        }
    }

    pub fn has_production(&self) -> bool {
        !self.goals.is_empty() || !self.assists.is_empty()
    }
}

/// Outcome of normalizing an upstream payload.
#[derive(Debug, Clone)]
pub enum NormalizeResult {
    /// Payload contained usable player stats.
    Ready(Vec<GamePlayerStats>),
    /// Payload had no stats section yet. Live feeds publish the
    /// score before the per-player tables; callers should retry later.
    StatsNotReady,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Position;

    #[test]
    fn stat_key_display_distinguishes_external_ids() {
        assert_eq!(StatKey::Roster("p1".to_string()).to_string(), "p1");
        assert_eq!(StatKey::External(8480021).to_string(), "ext:8480021");
    }

    #[test]
    fn roster_id_is_none_for_external_keys() {
        assert_eq!(
            StatKey::Roster("p1".to_string()).roster_id(),
            Some("p1")
        );
        assert_eq!(StatKey::External(42).roster_id(), None);
    }

    #[test]
    fn zeroed_line_has_no_production() {
        let line = GamePlayerStats::zeroed(
            StatKey::Roster("p1".to_string()),
            "Dylan Larkin".to_string(),
            Position::Center,
        );
        assert!(!line.has_production());
        assert!(line.goals.is_empty());
        assert!(line.assists.is_empty());
    }
}
