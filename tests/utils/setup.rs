use std::sync::Arc;

use lamplighter::{
    config::PoolConfig,
    draft::{DraftOrderService, InMemoryDraftOrderStore},
    game::InMemoryGameRepository,
    picks::{InMemoryPickRepository, PickService},
    results::{InMemoryGameResultRepository, InMemorySeasonScoreRepository, ResultResolver},
    roster::{Player, Position, StaticRosterProvider},
    stats::StatNormalizer,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub games: Arc<InMemoryGameRepository>,
    pub picks: Arc<InMemoryPickRepository>,
    pub results: Arc<InMemoryGameResultRepository>,
    pub draft: Arc<DraftOrderService>,
    pub pick_service: PickService,
    pub resolver: ResultResolver,
    pub users: Vec<String>,
}

pub struct TestSetupBuilder {
    users: Vec<String>,
    roster: Vec<Player>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            users: vec![],
            roster: default_roster(),
        }
    }

    pub fn with_users(mut self, users: Vec<&str>) -> Self {
        self.users = users.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_three_users(self) -> Self {
        self.with_users(vec!["alice", "bruno", "carmen"])
    }

    pub fn with_four_users(self) -> Self {
        self.with_users(vec!["alice", "bruno", "carmen", "devi"])
    }

    pub fn with_roster(mut self, roster: Vec<Player>) -> Self {
        self.roster = roster;
        self
    }

    pub async fn build(self) -> TestSetup {
        let games = Arc::new(InMemoryGameRepository::new());
        let picks = Arc::new(InMemoryPickRepository::new());
        let results = Arc::new(InMemoryGameResultRepository::new());
        let season = Arc::new(InMemorySeasonScoreRepository::new());
        let roster_provider = Arc::new(StaticRosterProvider::new(self.roster));
        let draft = Arc::new(DraftOrderService::new(Arc::new(
            InMemoryDraftOrderStore::new(),
        )));

        let pick_service = PickService::new(picks.clone(), games.clone(), roster_provider.clone());
        let resolver = ResultResolver::new(
            games.clone(),
            picks.clone(),
            results.clone(),
            season,
            roster_provider,
            draft.clone(),
            StatNormalizer::new(PoolConfig::default()),
        );

        draft.set_order(self.users.clone()).await.unwrap();

        TestSetup {
            games,
            picks,
            results,
            draft,
            pick_service,
            resolver,
            users: self.users,
        }
    }
}

/// Default roster: three forwards and a goalie.
pub fn default_roster() -> Vec<Player> {
    vec![
        player("larkin", "Dylan Larkin", "C", 8477946),
        player("raymond", "Lucas Raymond", "RW", 8482078),
        player("debrincat", "Alex DeBrincat", "LW", 8479337),
        player("talbot", "Cam Talbot", "G", 8475660),
    ]
}

pub fn player(id: &str, name: &str, code: &str, external_id: i64) -> Player {
    Player {
        id: id.to_string(),
        name: name.to_string(),
        number: None,
        position: Position::from_code(code),
        external_id: Some(external_id),
        active: true,
    }
}
