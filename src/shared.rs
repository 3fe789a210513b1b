use thiserror::Error;

/// Error surfaced by a persistence backend.
///
/// The in-memory stores never produce one; a database-backed implementation
/// maps its driver errors here so services stay storage-agnostic.
#[derive(Debug, Error)]
#[error("storage error: {0}")]
pub struct StoreError(pub String);

/// Error surfaced by an external data collaborator (roster or game data).
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}
