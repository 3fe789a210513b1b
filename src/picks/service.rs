use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::errors::PickError;
use super::models::{Pick, Selection};
use super::repository::{CreatePickResult, PickRepository};
use crate::game::GameRepository;
use crate::roster::RosterProvider;

/// Validates and stores picks against the game clock and the roster.
pub struct PickService {
    picks: Arc<dyn PickRepository>,
    games: Arc<dyn GameRepository>,
    roster: Arc<dyn RosterProvider>,
}

impl PickService {
    pub fn new(
        picks: Arc<dyn PickRepository>,
        games: Arc<dyn GameRepository>,
        roster: Arc<dyn RosterProvider>,
    ) -> Self {
        Self {
            picks,
            games,
            roster,
        }
    }

    /// Creates a pick. `now` is the submission clock; picks land only
    /// while the game's window is open.
    #[instrument(skip(self))]
    pub async fn create_pick(
        &self,
        user_id: &str,
        league_id: &str,
        game_id: &str,
        selection: Selection,
        now: DateTime<Utc>,
    ) -> Result<Pick, PickError> {
        let game = self
            .games
            .get_game(game_id)
            .await?
            .ok_or_else(|| PickError::GameNotFound(game_id.to_string()))?;

        if !game.picks_open(now) {
            debug!(game_id = %game_id, status = %game.status, "Pick rejected, window closed");
            return Err(PickError::PicksLocked);
        }

        if let Selection::Player(player_id) = &selection {
            match self.roster.fetch_roster().await {
                Ok(roster) => {
                    if !roster.iter().any(|player| &player.id == player_id) {
                        return Err(PickError::PlayerNotFound(player_id.clone()));
                    }
                }
                Err(err) => {
                    // A roster outage must not block submissions; the pick
                    // goes in unvalidated.
                    warn!(error = %err, "Roster unavailable, accepting pick without validation");
                }
            }
        }

        let pick = Pick::new(
            user_id.to_string(),
            league_id.to_string(),
            game_id.to_string(),
            selection,
        );
        match self.picks.try_create(pick).await? {
            CreatePickResult::Created(pick) => Ok(pick),
            CreatePickResult::DuplicatePick => Err(PickError::AlreadyPicked),
        }
    }

    /// Removes a user's own pick while the window is still open.
    #[instrument(skip(self))]
    pub async fn delete_pick(
        &self,
        user_id: &str,
        pick_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), PickError> {
        let pick = self
            .picks
            .get_pick(pick_id)
            .await?
            .ok_or_else(|| PickError::PickNotFound(pick_id.to_string()))?;

        if pick.user_id != user_id {
            return Err(PickError::NotYourPick);
        }
        if pick.locked_at.is_some() {
            return Err(PickError::PicksLocked);
        }

        match self.games.get_game(&pick.game_id).await? {
            Some(game) if !game.picks_open(now) => return Err(PickError::PicksLocked),
            Some(_) => {}
            None => {
                warn!(game_id = %pick.game_id, "Deleting pick for a game that no longer exists");
            }
        }

        self.picks.delete_pick(pick_id).await?;
        debug!(pick_id = %pick_id, user_id = %user_id, "Pick deleted");
        Ok(())
    }

    /// Stamps the lock time on every open pick for a game once its
    /// window has closed. Idempotent; repeated calls stamp nothing new.
    #[instrument(skip(self))]
    pub async fn lock_picks(&self, game_id: &str, now: DateTime<Utc>) -> Result<usize, PickError> {
        let game = self
            .games
            .get_game(game_id)
            .await?
            .ok_or_else(|| PickError::GameNotFound(game_id.to_string()))?;

        if game.picks_open(now) {
            debug!(game_id = %game_id, "Window still open, nothing to lock");
            return Ok(0);
        }

        // The stamp is the scheduled lock time, not the call time.
        let stamped = self.picks.lock_game_picks(game_id, game.lock_time()).await?;
        if stamped > 0 {
            debug!(game_id = %game_id, stamped, "Picks locked");
        }
        Ok(stamped)
    }

    pub async fn picks_for_game(&self, game_id: &str) -> Result<Vec<Pick>, PickError> {
        Ok(self.picks.list_for_game(game_id).await?)
    }
}
