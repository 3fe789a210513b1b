// Public API - what other modules can use
pub use errors::PickError;
pub use models::{Pick, PickWindow, Selection};
pub use repository::{CreatePickResult, InMemoryPickRepository, PickRepository};
pub use service::PickService;

// Internal modules
mod errors;
mod models;
mod repository;
mod service;
