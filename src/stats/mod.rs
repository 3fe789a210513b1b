// Public API - what other modules can use
pub use models::{
    AssistEvent, GamePlayerStats, GoalEvent, NormalizeResult, StatKey,
};
pub use normalizer::StatNormalizer;
pub use simulator::{simulate_game_stats, simulate_outcome};

// Internal modules
mod extract;
mod models;
mod normalizer;
mod simulator;
