use thiserror::Error;

use crate::shared::StoreError;

#[derive(Debug, Error)]
pub enum PickError {
    #[error("game not found: {0}")]
    GameNotFound(String),

    #[error("picks are locked for this game")]
    PicksLocked,

    #[error("player is not on the roster: {0}")]
    PlayerNotFound(String),

    #[error("a pick already exists for this game")]
    AlreadyPicked,

    #[error("pick not found: {0}")]
    PickNotFound(String),

    #[error("pick belongs to another user")]
    NotYourPick,

    #[error(transparent)]
    Store(#[from] StoreError),
}
