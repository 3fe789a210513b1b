// Public API - what other modules can use
pub use payload::{BoxScorePayload, RawGamePayload};
pub use provider::{GameDataFetch, GameDataProvider, StaticGameDataProvider};
pub use service::GameDataService;

// Internal modules
mod payload;
mod provider;
mod service;
