use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::{Game, GameOutcome, GameStatus};
use crate::shared::StoreError;

/// Result of attempting to finalize a game.
#[derive(Debug, Clone)]
pub enum FinalizeResult {
    /// Game transitioned to final, returns the frozen record.
    Finalized(Game),
    /// Game had already gone final; score fields stay untouched.
    AlreadyFinal,
    /// Game does not exist.
    GameNotFound,
}

/// Trait for game schedule storage.
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn create_game(&self, game: &Game) -> Result<(), StoreError>;
    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, StoreError>;
    async fn list_games(&self) -> Result<Vec<Game>, StoreError>;

    /// Moves a game between pre-final states (scheduled, in progress).
    /// Final games are frozen; the call leaves them untouched.
    async fn set_status(
        &self,
        game_id: &str,
        status: GameStatus,
    ) -> Result<Option<Game>, StoreError>;

    /// Atomically finalizes a game: the status check and the outcome write
    /// happen under one guard, so a game goes final exactly once.
    async fn try_finalize(
        &self,
        game_id: &str,
        outcome: &GameOutcome,
    ) -> Result<FinalizeResult, StoreError>;
}

/// In-memory implementation of GameRepository for development and testing.
pub struct InMemoryGameRepository {
    games: Mutex<HashMap<String, Game>>,
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self {
            games: Mutex::new(HashMap::new()),
        }
    }

    fn lock_games(&self) -> std::sync::MutexGuard<'_, HashMap<String, Game>> {
        match self.games.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    #[instrument(skip(self, game))]
    async fn create_game(&self, game: &Game) -> Result<(), StoreError> {
        debug!(game_id = %game.id, opponent = %game.opponent, "Creating game in memory");

        let mut games = self.lock_games();
        if games.contains_key(&game.id) {
            warn!(game_id = %game.id, "Game already exists in memory");
            return Err(StoreError("game already exists".to_string()));
        }
        games.insert(game.id.clone(), game.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_game(&self, game_id: &str) -> Result<Option<Game>, StoreError> {
        let games = self.lock_games();
        Ok(games.get(game_id).cloned())
    }

    #[instrument(skip(self))]
    async fn list_games(&self) -> Result<Vec<Game>, StoreError> {
        let games = self.lock_games();
        let mut list: Vec<Game> = games.values().cloned().collect();
        list.sort_by_key(|game| game.starts_at);
        Ok(list)
    }

    #[instrument(skip(self))]
    async fn set_status(
        &self,
        game_id: &str,
        status: GameStatus,
    ) -> Result<Option<Game>, StoreError> {
        let mut games = self.lock_games();
        let game = match games.get_mut(game_id) {
            Some(game) => game,
            None => return Ok(None),
        };

        if game.is_final() {
            warn!(game_id = %game_id, "Refusing status change on a final game");
            return Ok(Some(game.clone()));
        }

        debug!(game_id = %game_id, from = %game.status, to = %status, "Updating game status");
        game.status = status;
        Ok(Some(game.clone()))
    }

    #[instrument(skip(self, outcome))]
    async fn try_finalize(
        &self,
        game_id: &str,
        outcome: &GameOutcome,
    ) -> Result<FinalizeResult, StoreError> {
        let mut games = self.lock_games();

        let game = match games.get_mut(game_id) {
            Some(game) => game,
            None => {
                debug!(game_id = %game_id, "Game not found");
                return Ok(FinalizeResult::GameNotFound);
            }
        };

        if game.is_final() {
            debug!(game_id = %game_id, "Game already final");
            return Ok(FinalizeResult::AlreadyFinal);
        }

        game.apply_outcome(outcome);
        debug!(
            game_id = %game_id,
            team_goals = game.team_goals,
            opponent_goals = game.opponent_goals,
            "Game finalized (atomic)"
        );
        Ok(FinalizeResult::Finalized(game.clone()))
    }
}
