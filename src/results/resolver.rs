use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::errors::ResolveError;
use super::models::{GameResult, SeasonScore};
use super::repository::{GameResultRepository, SeasonScoreRepository};
use crate::draft::DraftOrderService;
use crate::game::{FinalizeResult, Game, GameOutcome, GameRepository};
use crate::gamedata::RawGamePayload;
use crate::picks::{PickRepository, Selection};
use crate::roster::RosterProvider;
use crate::scoring::{player_points, team_bonus_points};
use crate::stats::{simulate_game_stats, GamePlayerStats, NormalizeResult, StatKey, StatNormalizer};

/// Scores a finished game: turns its payload into stat lines, pays out
/// every pick, stores the result, and rebuilds the season totals.
pub struct ResultResolver {
    games: Arc<dyn GameRepository>,
    picks: Arc<dyn PickRepository>,
    results: Arc<dyn GameResultRepository>,
    season: Arc<dyn SeasonScoreRepository>,
    roster: Arc<dyn RosterProvider>,
    draft: Arc<DraftOrderService>,
    normalizer: StatNormalizer,
    game_mutexes: Arc<RwLock<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl ResultResolver {
    pub fn new(
        games: Arc<dyn GameRepository>,
        picks: Arc<dyn PickRepository>,
        results: Arc<dyn GameResultRepository>,
        season: Arc<dyn SeasonScoreRepository>,
        roster: Arc<dyn RosterProvider>,
        draft: Arc<DraftOrderService>,
        normalizer: StatNormalizer,
    ) -> Self {
        Self {
            games,
            picks,
            results,
            season,
            roster,
            draft,
            normalizer,
            game_mutexes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Freezes a game's score. The underlying write is atomic, so of
    /// two concurrent callers exactly one gets the finalized record.
    #[instrument(skip(self, outcome))]
    pub async fn finalize_game(
        &self,
        game_id: &str,
        outcome: &GameOutcome,
    ) -> Result<Game, ResolveError> {
        match self.games.try_finalize(game_id, outcome).await? {
            FinalizeResult::Finalized(game) => {
                info!(
                    game_id = %game_id,
                    team_goals = game.team_goals,
                    opponent_goals = game.opponent_goals,
                    "Game finalized"
                );
                Ok(game)
            }
            FinalizeResult::AlreadyFinal => Err(ResolveError::AlreadyFinal),
            FinalizeResult::GameNotFound => Err(ResolveError::GameNotFound(game_id.to_string())),
        }
    }

    /// Resolves a final game exactly once.
    ///
    /// All of it runs under a per-game lock: a second attempt, even a
    /// concurrent one, is rejected with `AlreadyResolved` and mutates
    /// nothing. A payload whose stats have not landed yet aborts with
    /// `StatsNotReady`, also without mutating.
    #[instrument(skip(self, payload))]
    pub async fn resolve_game(
        &self,
        game_id: &str,
        payload: RawGamePayload,
    ) -> Result<GameResult, ResolveError> {
        let game_lock = self.game_lock(game_id).await;
        let _guard = game_lock.lock().await;

        let game = self
            .games
            .get_game(game_id)
            .await?
            .ok_or_else(|| ResolveError::GameNotFound(game_id.to_string()))?;
        if !game.is_final() {
            debug!(game_id = %game_id, status = %game.status, "Refusing to resolve a live game");
            return Err(ResolveError::GameNotFinal);
        }
        if self.results.get_by_game(game_id).await?.is_some() {
            debug!(game_id = %game_id, "Game already resolved");
            return Err(ResolveError::AlreadyResolved);
        }

        let roster = match self.roster.fetch_roster().await {
            Ok(roster) => roster,
            Err(err) => {
                warn!(error = %err, "Roster unavailable, scoring from payload ids only");
                Vec::new()
            }
        };

        let stats = match payload {
            RawGamePayload::BoxScore(payload) => {
                match self.normalizer.normalize(&game, &payload, &roster) {
                    NormalizeResult::Ready(lines) => lines,
                    NormalizeResult::StatsNotReady => return Err(ResolveError::StatsNotReady),
                }
            }
            RawGamePayload::Simulated => simulate_game_stats(&game, &roster, &mut rand::rng()),
        };

        let outcome = game.outcome();
        let team_points = team_bonus_points(game.team_goals);

        let picks = self.picks.list_for_game(game_id).await?;
        let pick_count = picks.len();
        for mut pick in picks {
            pick.points_earned = match &pick.selection {
                Selection::Team => team_points,
                Selection::Player(player_id) => pick_points(&stats, &outcome, player_id),
            };
            // Resolution closes any window that slipped past the lock pass.
            pick.locked_at = pick.locked_at.or_else(|| Some(game.lock_time()));
            if !self.picks.update_pick(&pick).await? {
                warn!(pick_id = %pick.id, "Pick vanished during resolution");
            }
        }

        let result = GameResult {
            id: Uuid::new_v4().to_string(),
            game_id: game_id.to_string(),
            player_stats: stats,
            team_points,
            completed_at: Utc::now(),
        };
        if !self.results.try_create(&result).await? {
            return Err(ResolveError::AlreadyResolved);
        }

        self.recompute_season_totals().await?;
        self.draft.rotate().await?;

        info!(
            game_id = %game_id,
            picks = pick_count,
            team_points,
            "Game resolved (atomic)"
        );
        Ok(result)
    }

    pub async fn result_for_game(&self, game_id: &str) -> Result<Option<GameResult>, ResolveError> {
        Ok(self.results.get_by_game(game_id).await?)
    }

    /// Season totals, highest first; ties break by user id.
    pub async fn standings(&self) -> Result<Vec<SeasonScore>, ResolveError> {
        let mut scores = self.season.list().await?;
        scores.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        Ok(scores)
    }

    /// Clears picks, results, and season totals. The draft order is
    /// league structure, not scoring state, and survives.
    #[instrument(skip(self))]
    pub async fn reset_season(&self) -> Result<(), ResolveError> {
        self.picks.clear().await?;
        self.results.clear().await?;
        self.season.clear().await?;
        info!("Season reset");
        Ok(())
    }

    /// Totals are rebuilt from the full pick history rather than
    /// incremented, so replaying a partial failure cannot double-count.
    async fn recompute_season_totals(&self) -> Result<(), ResolveError> {
        let picks = self.picks.list_all().await?;
        let mut totals: HashMap<String, i32> = HashMap::new();
        for pick in picks {
            *totals.entry(pick.user_id).or_insert(0) += pick.points_earned;
        }
        let scores = totals
            .into_iter()
            .map(|(user_id, points)| SeasonScore { user_id, points })
            .collect();
        self.season.replace_all(scores).await?;
        Ok(())
    }

    async fn game_lock(&self, game_id: &str) -> Arc<AsyncMutex<()>> {
        {
            let guard = self.game_mutexes.read().await;
            if let Some(lock) = guard.get(game_id) {
                return lock.clone();
            }
        }

        let mut guard = self.game_mutexes.write().await;
        guard
            .entry(game_id.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }
}

/// Points for a player pick. Picks hold roster ids; a numeric id can
/// still reach a line the normalizer kept under its external key.
fn pick_points(stats: &[GamePlayerStats], outcome: &GameOutcome, player_id: &str) -> i32 {
    let line = stats
        .iter()
        .find(|line| line.player.roster_id() == Some(player_id))
        .or_else(|| {
            let ext: i64 = player_id.parse().ok()?;
            stats.iter().find(|line| line.player == StatKey::External(ext))
        });

    match line {
        Some(line) => player_points(line, outcome),
        None => {
            warn!(player_id = %player_id, "Pick references a player with no stat line");
            0
        }
    }
}
