// Public API - what other modules can use
pub use errors::ResolveError;
pub use models::{GameResult, SeasonScore};
pub use repository::{
    GameResultRepository, InMemoryGameResultRepository, InMemorySeasonScoreRepository,
    SeasonScoreRepository,
};
pub use resolver::ResultResolver;

// Internal modules
mod errors;
mod models;
mod repository;
mod resolver;
