use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lamplighter::config::PoolConfig;
use lamplighter::draft::{DraftOrderService, InMemoryDraftOrderStore};
use lamplighter::game::{Game, GameRepository, InMemoryGameRepository};
use lamplighter::gamedata::{
    BoxScorePayload, GameDataFetch, GameDataService, RawGamePayload, StaticGameDataProvider,
};
use lamplighter::picks::{InMemoryPickRepository, PickService, Selection};
use lamplighter::results::{
    InMemoryGameResultRepository, InMemorySeasonScoreRepository, ResultResolver,
};
use lamplighter::roster::{Player, Position, StaticRosterProvider};
use lamplighter::stats::{simulate_outcome, StatNormalizer};

const TONIGHT_EXTERNAL_ID: i64 = 2024020555;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lamplighter=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PoolConfig::from_env();
    info!(team = %config.team_name, abbrev = %config.team_abbrev, "Starting pick'em demo night");

    // Wire the in-memory stack. Swapping in persistent implementations
    // only changes these constructors.
    let games = Arc::new(InMemoryGameRepository::new());
    let picks = Arc::new(InMemoryPickRepository::new());
    let results = Arc::new(InMemoryGameResultRepository::new());
    let season = Arc::new(InMemorySeasonScoreRepository::new());
    let roster_provider = Arc::new(StaticRosterProvider::new(demo_roster()));
    let draft = Arc::new(DraftOrderService::new(Arc::new(
        InMemoryDraftOrderStore::new(),
    )));
    let normalizer = StatNormalizer::new(config);

    // The live feed has nothing for tonight yet; the archive does.
    let game_data = GameDataService::new(Arc::new(StaticGameDataProvider::new())).with_historical(
        Arc::new(StaticGameDataProvider::new().with_payload(TONIGHT_EXTERNAL_ID, demo_box_score())),
    );

    let pick_service = PickService::new(picks.clone(), games.clone(), roster_provider.clone());
    let resolver = ResultResolver::new(
        games.clone(),
        picks,
        results,
        season,
        roster_provider,
        draft.clone(),
        normalizer.clone(),
    );

    let users = ["alice", "bruno", "carmen"];
    draft
        .set_order(users.iter().map(|user| user.to_string()).collect())
        .await
        .unwrap();

    // Tonight's game plus the next one on the slate.
    let mut tonight = Game::scheduled(
        "game-1".to_string(),
        "Chicago Blackhawks".to_string(),
        Utc::now() + Duration::hours(3),
        true,
    );
    tonight.external_id = Some(TONIGHT_EXTERNAL_ID);
    let next = Game::scheduled(
        "game-2".to_string(),
        "St. Louis Blues".to_string(),
        Utc::now() + Duration::days(2),
        false,
    );
    games.create_game(&tonight).await.unwrap();
    games.create_game(&next).await.unwrap();

    // Everyone picks while the window is open.
    let selections = [
        ("alice", Selection::Player("larkin".to_string())),
        ("bruno", Selection::Team),
        ("carmen", Selection::Player("talbot".to_string())),
    ];
    for (user, selection) in selections {
        let pick = pick_service
            .create_pick(user, "division-rivals", "game-1", selection, Utc::now())
            .await
            .unwrap();
        info!(user = %pick.user_id, selection = %pick.selection, "Pick submitted");
    }

    // Game night: fetch the box score, freeze the score, close the
    // window, and settle up.
    let payload = match game_data.fetch_for_game(TONIGHT_EXTERNAL_ID).await {
        GameDataFetch::Ready(payload) => payload,
        GameDataFetch::NotReady => {
            info!("Box score not posted yet, try again next poll");
            return;
        }
    };
    let outcome = normalizer
        .extract_outcome(&payload, tonight.is_home)
        .unwrap();
    resolver.finalize_game("game-1", &outcome).await.unwrap();
    pick_service.lock_picks("game-1", Utc::now()).await.unwrap();

    let result = resolver
        .resolve_game("game-1", RawGamePayload::BoxScore(payload))
        .await
        .unwrap();
    info!(
        team_goals = outcome.team_goals,
        opponent_goals = outcome.opponent_goals,
        overtime = outcome.went_to_overtime,
        team_points = result.team_points,
        "Game resolved from the box score"
    );
    for line in result
        .player_stats
        .iter()
        .filter(|line| line.has_production())
    {
        info!(
            player = %line.name,
            position = %line.position,
            goals = line.goals.len(),
            assists = line.assists.len(),
            "Scoring line"
        );
    }

    // Two nights later, with the order rotated. No feed covers this
    // one, so the slate runs simulated.
    let selections = [
        ("alice", Selection::Player("raymond".to_string())),
        ("bruno", Selection::Player("seider".to_string())),
        ("carmen", Selection::Team),
    ];
    for (user, selection) in selections {
        pick_service
            .create_pick(user, "division-rivals", "game-2", selection, Utc::now())
            .await
            .unwrap();
    }

    let outcome = simulate_outcome(&mut rand::rng());
    resolver.finalize_game("game-2", &outcome).await.unwrap();
    pick_service.lock_picks("game-2", Utc::now()).await.unwrap();
    let result = resolver
        .resolve_game("game-2", RawGamePayload::Simulated)
        .await
        .unwrap();
    info!(
        team_goals = outcome.team_goals,
        opponent_goals = outcome.opponent_goals,
        overtime = outcome.went_to_overtime,
        shootout = outcome.shootout_occurred,
        team_points = result.team_points,
        "Game resolved from a simulated slate"
    );

    for score in resolver.standings().await.unwrap() {
        info!(user = %score.user_id, points = score.points, "Season standings");
    }
    info!(order = ?draft.current_order().await.unwrap(), "Draft order for the next game");
}

fn demo_roster() -> Vec<Player> {
    let entries = [
        ("larkin", "Dylan Larkin", 71, "C", 8477946),
        ("raymond", "Lucas Raymond", 23, "RW", 8482078),
        ("debrincat", "Alex DeBrincat", 93, "LW", 8479337),
        ("compher", "J.T. Compher", 37, "C", 8477456),
        ("seider", "Moritz Seider", 53, "D", 8481542),
        ("chiarot", "Ben Chiarot", 8, "D", 8475279),
        ("talbot", "Cam Talbot", 39, "G", 8475660),
    ];
    entries
        .into_iter()
        .map(|(id, name, number, code, external_id)| Player {
            id: id.to_string(),
            name: name.to_string(),
            number: Some(number),
            position: Position::from_code(code),
            external_id: Some(external_id),
            active: true,
        })
        .collect()
}

/// Canned 4-2 home win: four goals, one of them shorthanded.
fn demo_box_score() -> BoxScorePayload {
    BoxScorePayload::new(json!({
        "homeTeam": { "id": 17, "abbrev": "DET", "score": 4 },
        "awayTeam": { "id": 16, "abbrev": "CHI", "score": 2 },
        "playerByGameStats": {
            "homeTeam": {
                "forwards": [
                    { "playerId": 8477946, "goals": 1, "assists": 1, "position": "C" },
                    { "playerId": 8482078, "goals": 1, "assists": 1, "position": "RW" },
                    { "playerId": 8479337, "goals": 0, "assists": 2, "position": "LW" },
                    { "playerId": 8477456, "goals": 1, "assists": 0, "position": "C" }
                ],
                "defense": [
                    { "playerId": 8481542, "goals": 1, "assists": 0, "position": "D" },
                    { "playerId": 8475279, "goals": 0, "assists": 1, "position": "D" }
                ],
                "goalies": [
                    { "playerId": 8475660, "goals": 0, "assists": 0, "position": "G" }
                ]
            }
        }
    }))
    .with_play_by_play(json!({
        "plays": [
            {
                "typeDescKey": "goal",
                "periodDescriptor": { "number": 1, "periodType": "REG" },
                "details": {
                    "eventOwnerTeamId": 17,
                    "scoringPlayerId": 8477946,
                    "assistPlayerIds": [8479337]
                }
            },
            {
                "typeDescKey": "goal",
                "periodDescriptor": { "number": 2, "periodType": "REG" },
                "situationCode": "SH",
                "details": {
                    "eventOwnerTeamId": 17,
                    "scoringPlayerId": 8481542,
                    "assistPlayerIds": [8477946]
                }
            },
            {
                "typeDescKey": "goal",
                "periodDescriptor": { "number": 2, "periodType": "REG" },
                "details": {
                    "eventOwnerTeamId": 16,
                    "scoringPlayerId": 8480023
                }
            },
            {
                "typeDescKey": "goal",
                "periodDescriptor": { "number": 3, "periodType": "REG" },
                "details": {
                    "eventOwnerTeamId": 17,
                    "scoringPlayerId": 8482078,
                    "assistPlayerIds": [8479337, 8475279]
                }
            },
            {
                "typeDescKey": "goal",
                "periodDescriptor": { "number": 3, "periodType": "REG" },
                "details": {
                    "eventOwnerTeamId": 16,
                    "scoringPlayerId": 8480023
                }
            },
            {
                "typeDescKey": "goal",
                "periodDescriptor": { "number": 3, "periodType": "REG" },
                "details": {
                    "eventOwnerTeamId": 17,
                    "scoringPlayerId": 8477456,
                    "assistPlayerIds": [8482078]
                }
            }
        ]
    }))
}
