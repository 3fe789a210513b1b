// Library crate for the season pick'em scoring engine
// This file exposes the public API for integration tests

pub mod config;
pub mod draft;
pub mod game;
pub mod gamedata;
pub mod picks;
pub mod results;
pub mod roster;
pub mod scoring;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use config::PoolConfig;
pub use draft::{DraftOrderService, RotationOutcome};
pub use game::{Game, GameOutcome, GameRepository, GameStatus};
pub use picks::{Pick, PickService, PickWindow, Selection};
pub use results::{GameResult, ResultResolver, SeasonScore};
pub use roster::{Player, Position, RosterProvider};
pub use stats::{GamePlayerStats, StatNormalizer};
