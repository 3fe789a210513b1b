use async_trait::async_trait;
use tracing::{debug, instrument};

use super::models::Player;
use crate::shared::ProviderError;

/// Supplies the roster of eligible players for the tracked team.
///
/// A fetch failure degrades to "no players available": callers proceed with
/// an empty roster instead of aborting a scoring pass.
#[async_trait]
pub trait RosterProvider: Send + Sync {
    async fn fetch_roster(&self) -> Result<Vec<Player>, ProviderError>;
}

/// Fixed roster held in memory, for development and testing.
pub struct StaticRosterProvider {
    players: Vec<Player>,
}

impl StaticRosterProvider {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }
}

#[async_trait]
impl RosterProvider for StaticRosterProvider {
    #[instrument(skip(self))]
    async fn fetch_roster(&self) -> Result<Vec<Player>, ProviderError> {
        debug!(player_count = self.players.len(), "Serving static roster");
        Ok(self.players.clone())
    }
}
