use async_trait::async_trait;
use std::collections::HashMap;

use super::payload::BoxScorePayload;
use crate::shared::ProviderError;

/// Outcome of a provider fetch for one game.
#[derive(Debug, Clone)]
pub enum GameDataFetch {
    /// Feed has data for the game.
    Ready(BoxScorePayload),
    /// Game not final upstream yet; the normal not-ready state, not an error.
    NotReady,
}

/// Supplies raw payloads for a numeric external game id.
///
/// Implementations cover the live feed and the historical archive; the
/// transport behind them is out of scope here.
#[async_trait]
pub trait GameDataProvider: Send + Sync {
    async fn fetch_game_data(&self, external_game_id: i64)
        -> Result<GameDataFetch, ProviderError>;
}

/// Canned payloads keyed by external game id, for development and testing.
#[derive(Default)]
pub struct StaticGameDataProvider {
    payloads: HashMap<i64, BoxScorePayload>,
}

impl StaticGameDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(mut self, external_game_id: i64, payload: BoxScorePayload) -> Self {
        self.payloads.insert(external_game_id, payload);
        self
    }
}

#[async_trait]
impl GameDataProvider for StaticGameDataProvider {
    async fn fetch_game_data(
        &self,
        external_game_id: i64,
    ) -> Result<GameDataFetch, ProviderError> {
        match self.payloads.get(&external_game_id) {
            Some(payload) => Ok(GameDataFetch::Ready(payload.clone())),
            None => Ok(GameDataFetch::NotReady),
        }
    }
}
