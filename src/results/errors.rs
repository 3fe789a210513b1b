use thiserror::Error;

use crate::shared::StoreError;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("game not found: {0}")]
    GameNotFound(String),

    #[error("game is not final yet")]
    GameNotFinal,

    #[error("game already final")]
    AlreadyFinal,

    #[error("game already resolved")]
    AlreadyResolved,

    #[error("results are not available yet")]
    StatsNotReady,

    #[error(transparent)]
    Store(#[from] StoreError),
}
