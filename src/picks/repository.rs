use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument};

use super::models::Pick;
use crate::shared::StoreError;

/// Result of attempting to create a pick.
#[derive(Debug, Clone)]
pub enum CreatePickResult {
    /// Pick stored, returns it with its generated id.
    Created(Pick),
    /// The user already holds a pick for this game in this league.
    DuplicatePick,
}

/// Trait for pick storage.
#[async_trait]
pub trait PickRepository: Send + Sync {
    /// Stores a pick unless the user already holds one for the same game
    /// and league. The uniqueness check and the insert happen under one
    /// guard, so concurrent submissions produce exactly one pick.
    async fn try_create(&self, pick: Pick) -> Result<CreatePickResult, StoreError>;

    async fn get_pick(&self, pick_id: &str) -> Result<Option<Pick>, StoreError>;

    /// Removes a pick; false when it was not there.
    async fn delete_pick(&self, pick_id: &str) -> Result<bool, StoreError>;

    /// Picks for one game, ordered by submission time.
    async fn list_for_game(&self, game_id: &str) -> Result<Vec<Pick>, StoreError>;

    /// Every stored pick, ordered by submission time. Season recomputes
    /// read from here.
    async fn list_all(&self) -> Result<Vec<Pick>, StoreError>;

    /// Overwrites a stored pick in place (lock stamp, earned points).
    /// False when the pick no longer exists.
    async fn update_pick(&self, pick: &Pick) -> Result<bool, StoreError>;

    /// Stamps every unstamped pick for a game with the given lock time.
    /// Returns how many picks were newly stamped.
    async fn lock_game_picks(
        &self,
        game_id: &str,
        locked_at: DateTime<Utc>,
    ) -> Result<usize, StoreError>;

    /// Removes every pick. Season reset only.
    async fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory implementation of PickRepository for development and testing.
pub struct InMemoryPickRepository {
    picks: Mutex<HashMap<String, Pick>>,
}

impl Default for InMemoryPickRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPickRepository {
    pub fn new() -> Self {
        Self {
            picks: Mutex::new(HashMap::new()),
        }
    }

    fn lock_picks(&self) -> std::sync::MutexGuard<'_, HashMap<String, Pick>> {
        match self.picks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl PickRepository for InMemoryPickRepository {
    #[instrument(skip(self, pick))]
    async fn try_create(&self, pick: Pick) -> Result<CreatePickResult, StoreError> {
        let mut picks = self.lock_picks();

        let taken = picks.values().any(|existing| {
            existing.user_id == pick.user_id
                && existing.league_id == pick.league_id
                && existing.game_id == pick.game_id
        });
        if taken {
            debug!(
                user_id = %pick.user_id,
                game_id = %pick.game_id,
                "Pick already exists for this user and game"
            );
            return Ok(CreatePickResult::DuplicatePick);
        }

        debug!(
            pick_id = %pick.id,
            user_id = %pick.user_id,
            game_id = %pick.game_id,
            selection = %pick.selection,
            "Pick created (atomic)"
        );
        picks.insert(pick.id.clone(), pick.clone());
        Ok(CreatePickResult::Created(pick))
    }

    #[instrument(skip(self))]
    async fn get_pick(&self, pick_id: &str) -> Result<Option<Pick>, StoreError> {
        let picks = self.lock_picks();
        Ok(picks.get(pick_id).cloned())
    }

    #[instrument(skip(self))]
    async fn delete_pick(&self, pick_id: &str) -> Result<bool, StoreError> {
        let mut picks = self.lock_picks();
        Ok(picks.remove(pick_id).is_some())
    }

    #[instrument(skip(self))]
    async fn list_for_game(&self, game_id: &str) -> Result<Vec<Pick>, StoreError> {
        let picks = self.lock_picks();
        let mut list: Vec<Pick> = picks
            .values()
            .filter(|pick| pick.game_id == game_id)
            .cloned()
            .collect();
        list.sort_by_key(|pick| pick.picked_at);
        Ok(list)
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Pick>, StoreError> {
        let picks = self.lock_picks();
        let mut list: Vec<Pick> = picks.values().cloned().collect();
        list.sort_by_key(|pick| pick.picked_at);
        Ok(list)
    }

    #[instrument(skip(self, pick))]
    async fn update_pick(&self, pick: &Pick) -> Result<bool, StoreError> {
        let mut picks = self.lock_picks();
        match picks.get_mut(&pick.id) {
            Some(stored) => {
                *stored = pick.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[instrument(skip(self))]
    async fn lock_game_picks(
        &self,
        game_id: &str,
        locked_at: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        let mut picks = self.lock_picks();
        let mut stamped = 0;
        for pick in picks.values_mut() {
            if pick.game_id == game_id && pick.locked_at.is_none() {
                pick.locked_at = Some(locked_at);
                stamped += 1;
            }
        }
        debug!(game_id = %game_id, stamped, "Locked picks for game");
        Ok(stamped)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<(), StoreError> {
        let mut picks = self.lock_picks();
        picks.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picks::models::Selection;

    /// Test helper functions for creating test data
    mod helpers {
        use super::*;

        pub fn pick(user_id: &str, league_id: &str, game_id: &str) -> Pick {
            Pick::new(
                user_id.to_string(),
                league_id.to_string(),
                game_id.to_string(),
                Selection::Player("p1".to_string()),
            )
        }
    }

    use helpers::*;

    #[tokio::test]
    async fn create_and_get_pick() {
        let repo = InMemoryPickRepository::new();

        let created = repo.try_create(pick("u1", "l1", "g1")).await.unwrap();
        let created = match created {
            CreatePickResult::Created(pick) => pick,
            other => panic!("expected Created, got {:?}", other),
        };

        let stored = repo.get_pick(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.user_id, "u1");
        assert_eq!(stored.points_earned, 0);
    }

    #[tokio::test]
    async fn second_pick_for_same_game_is_rejected() {
        let repo = InMemoryPickRepository::new();

        repo.try_create(pick("u1", "l1", "g1")).await.unwrap();
        let second = repo.try_create(pick("u1", "l1", "g1")).await.unwrap();
        assert!(matches!(second, CreatePickResult::DuplicatePick));
    }

    #[tokio::test]
    async fn same_user_can_pick_in_another_league_and_game() {
        let repo = InMemoryPickRepository::new();

        repo.try_create(pick("u1", "l1", "g1")).await.unwrap();
        let other_league = repo.try_create(pick("u1", "l2", "g1")).await.unwrap();
        assert!(matches!(other_league, CreatePickResult::Created(_)));

        let other_game = repo.try_create(pick("u1", "l1", "g2")).await.unwrap();
        assert!(matches!(other_game, CreatePickResult::Created(_)));
    }

    #[tokio::test]
    async fn lock_stamps_only_unstamped_picks_for_the_game() {
        let repo = InMemoryPickRepository::new();
        repo.try_create(pick("u1", "l1", "g1")).await.unwrap();
        repo.try_create(pick("u2", "l1", "g1")).await.unwrap();
        repo.try_create(pick("u1", "l1", "g2")).await.unwrap();

        let first_pass = Utc::now();
        assert_eq!(repo.lock_game_picks("g1", first_pass).await.unwrap(), 2);

        // Second pass stamps nothing and leaves the original stamps alone.
        let second_pass = first_pass + chrono::Duration::minutes(5);
        assert_eq!(repo.lock_game_picks("g1", second_pass).await.unwrap(), 0);
        for pick in repo.list_for_game("g1").await.unwrap() {
            assert_eq!(pick.locked_at, Some(first_pass));
        }

        let untouched = repo.list_for_game("g2").await.unwrap();
        assert!(untouched[0].locked_at.is_none());
    }

    #[tokio::test]
    async fn update_pick_reports_missing_picks() {
        let repo = InMemoryPickRepository::new();
        let ghost = pick("u1", "l1", "g1");
        assert!(!repo.update_pick(&ghost).await.unwrap());

        let created = match repo.try_create(ghost).await.unwrap() {
            CreatePickResult::Created(pick) => pick,
            other => panic!("expected Created, got {:?}", other),
        };
        let mut scored = created.clone();
        scored.points_earned = 7;
        assert!(repo.update_pick(&scored).await.unwrap());
        assert_eq!(
            repo.get_pick(&created.id).await.unwrap().unwrap().points_earned,
            7
        );
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let repo = InMemoryPickRepository::new();
        repo.try_create(pick("u1", "l1", "g1")).await.unwrap();
        repo.try_create(pick("u2", "l1", "g1")).await.unwrap();

        repo.clear().await.unwrap();
        assert!(repo.list_all().await.unwrap().is_empty());
    }
}
