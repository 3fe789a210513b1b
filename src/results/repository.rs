use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::models::{GameResult, SeasonScore};
use crate::shared::StoreError;

/// Trait for stored game results. At most one result exists per game.
#[async_trait]
pub trait GameResultRepository: Send + Sync {
    /// Stores a result unless its game already has one; false means
    /// nothing was written.
    async fn try_create(&self, result: &GameResult) -> Result<bool, StoreError>;

    async fn get_by_game(&self, game_id: &str) -> Result<Option<GameResult>, StoreError>;

    /// Every stored result, oldest first.
    async fn list_results(&self) -> Result<Vec<GameResult>, StoreError>;

    /// Removes every result. Season reset only.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// Trait for season total storage. Totals are always rewritten whole,
/// recomputed from pick history.
#[async_trait]
pub trait SeasonScoreRepository: Send + Sync {
    async fn replace_all(&self, scores: Vec<SeasonScore>) -> Result<(), StoreError>;
    async fn list(&self) -> Result<Vec<SeasonScore>, StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory implementation of GameResultRepository for development and testing.
#[derive(Debug, Default)]
pub struct InMemoryGameResultRepository {
    results: Arc<RwLock<HashMap<String, GameResult>>>,
}

impl InMemoryGameResultRepository {
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl GameResultRepository for InMemoryGameResultRepository {
    async fn try_create(&self, result: &GameResult) -> Result<bool, StoreError> {
        let mut results = self.results.write().await;
        if results.contains_key(&result.game_id) {
            return Ok(false);
        }
        results.insert(result.game_id.clone(), result.clone());
        Ok(true)
    }

    async fn get_by_game(&self, game_id: &str) -> Result<Option<GameResult>, StoreError> {
        let results = self.results.read().await;
        Ok(results.get(game_id).cloned())
    }

    async fn list_results(&self) -> Result<Vec<GameResult>, StoreError> {
        let results = self.results.read().await;
        let mut list: Vec<GameResult> = results.values().cloned().collect();
        list.sort_by_key(|result| result.completed_at);
        Ok(list)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut results = self.results.write().await;
        results.clear();
        Ok(())
    }
}

/// In-memory implementation of SeasonScoreRepository for development and testing.
#[derive(Debug, Default)]
pub struct InMemorySeasonScoreRepository {
    scores: Arc<RwLock<Vec<SeasonScore>>>,
}

impl InMemorySeasonScoreRepository {
    pub fn new() -> Self {
        Self {
            scores: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl SeasonScoreRepository for InMemorySeasonScoreRepository {
    async fn replace_all(&self, scores: Vec<SeasonScore>) -> Result<(), StoreError> {
        let mut stored = self.scores.write().await;
        *stored = scores;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SeasonScore>, StoreError> {
        let stored = self.scores.read().await;
        Ok(stored.clone())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut stored = self.scores.write().await;
        stored.clear();
        Ok(())
    }
}
