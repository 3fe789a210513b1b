// Public API - what other modules can use
pub use service::{DraftOrderService, RotationOutcome};
pub use store::{DraftOrderStore, InMemoryDraftOrderStore};

// Internal modules
mod service;
mod store;
