use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::provider::{GameDataFetch, GameDataProvider};

/// Fetches game data with fallback: the live feed first, then the historical
/// archive. A provider error is logged and treated as a miss; when every
/// source misses, the result is the not-ready outcome, never a hard failure.
pub struct GameDataService {
    live: Arc<dyn GameDataProvider>,
    historical: Option<Arc<dyn GameDataProvider>>,
}

impl GameDataService {
    pub fn new(live: Arc<dyn GameDataProvider>) -> Self {
        Self {
            live,
            historical: None,
        }
    }

    pub fn with_historical(mut self, provider: Arc<dyn GameDataProvider>) -> Self {
        self.historical = Some(provider);
        self
    }

    #[instrument(skip(self))]
    pub async fn fetch_for_game(&self, external_game_id: i64) -> GameDataFetch {
        match self.live.fetch_game_data(external_game_id).await {
            Ok(GameDataFetch::Ready(payload)) => return GameDataFetch::Ready(payload),
            Ok(GameDataFetch::NotReady) => {
                info!(external_game_id, "Live data not ready, trying historical archive");
            }
            Err(err) => {
                warn!(external_game_id, error = %err, "Live provider failed, trying historical archive");
            }
        }

        let historical = match &self.historical {
            Some(provider) => provider,
            None => {
                info!(external_game_id, "No historical provider configured");
                return GameDataFetch::NotReady;
            }
        };

        match historical.fetch_game_data(external_game_id).await {
            Ok(fetch) => fetch,
            Err(err) => {
                warn!(external_game_id, error = %err, "Historical provider failed");
                GameDataFetch::NotReady
            }
        }
    }
}
