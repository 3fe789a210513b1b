// Public API - what other modules can use
pub use models::{Player, Position, RosterGroups, ScoringRole};
pub use provider::{RosterProvider, StaticRosterProvider};

// Internal modules
pub mod models;
mod provider;
