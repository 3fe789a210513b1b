// Public API
pub use models::{Game, GameOutcome, GameStatus, LOCK_LEAD_MINUTES};
pub use repository::{FinalizeResult, GameRepository, InMemoryGameRepository};

// Internal modules
pub mod models;
pub mod repository;
