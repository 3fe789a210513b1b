use chrono::{DateTime, Duration, Utc};

use lamplighter::{
    game::{Game, GameOutcome, GameRepository},
    gamedata::RawGamePayload,
    picks::{Pick, PickError, PickRepository, Selection},
    results::{GameResult, SeasonScore},
};

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Schedule a home game two hours out; the pick window is open.
    pub async fn schedule_game(&self, game_id: &str) -> Game {
        self.schedule_game_at(game_id, Utc::now() + Duration::hours(2))
            .await
    }

    /// Schedule a home game at a specific start time.
    pub async fn schedule_game_at(&self, game_id: &str, starts_at: DateTime<Utc>) -> Game {
        let game = Game::scheduled(
            game_id.to_string(),
            "Chicago Blackhawks".to_string(),
            starts_at,
            true,
        );
        self.games.create_game(&game).await.unwrap();
        game
    }

    pub async fn game(&self, game_id: &str) -> Game {
        self.games.get_game(game_id).await.unwrap().unwrap()
    }

    /// Submit a pick through the service with an explicit clock.
    pub async fn make_pick(
        &self,
        user: &str,
        league: &str,
        game_id: &str,
        selection: Selection,
        now: DateTime<Utc>,
    ) -> Result<Pick, PickError> {
        self.pick_service
            .create_pick(user, league, game_id, selection, now)
            .await
    }

    /// Player pick in the default league, submitted now.
    pub async fn pick_player(&self, user: &str, game_id: &str, player_id: &str) -> Pick {
        self.make_pick(
            user,
            "main",
            game_id,
            Selection::Player(player_id.to_string()),
            Utc::now(),
        )
        .await
        .unwrap()
    }

    /// Team pick in the default league, submitted now.
    pub async fn pick_team(&self, user: &str, game_id: &str) -> Pick {
        self.make_pick(user, "main", game_id, Selection::Team, Utc::now())
            .await
            .unwrap()
    }

    pub async fn finalize(&self, game_id: &str, outcome: GameOutcome) -> Game {
        self.resolver.finalize_game(game_id, &outcome).await.unwrap()
    }

    pub async fn resolve(&self, game_id: &str, payload: RawGamePayload) -> GameResult {
        self.resolver.resolve_game(game_id, payload).await.unwrap()
    }

    pub async fn stored_pick(&self, pick_id: &str) -> Pick {
        self.picks.get_pick(pick_id).await.unwrap().unwrap()
    }

    pub async fn points_for_pick(&self, pick_id: &str) -> i32 {
        self.stored_pick(pick_id).await.points_earned
    }

    pub async fn standings(&self) -> Vec<SeasonScore> {
        self.resolver.standings().await.unwrap()
    }
}
