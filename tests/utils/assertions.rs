//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use lamplighter::results::SeasonScore;

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct StandingsAssertion {
    standings: Vec<SeasonScore>,
}

impl StandingsAssertion {
    /// Snapshot the season standings for chained checks.
    pub async fn for_setup(setup: &TestSetup) -> Self {
        Self {
            standings: setup.standings().await,
        }
    }

    /// Assert one user's season total.
    pub fn user_has(self, user_id: &str, points: i32) -> Self {
        match self
            .standings
            .iter()
            .find(|score| score.user_id == user_id)
        {
            Some(score) => assert_eq!(
                score.points, points,
                "{} should have {} points, has {}",
                user_id, points, score.points
            ),
            None => panic!("{} is missing from the standings", user_id),
        }
        self
    }

    /// Assert the full standings order, best first.
    pub fn ranked(self, expected: &[&str]) -> Self {
        let order: Vec<&str> = self
            .standings
            .iter()
            .map(|score| score.user_id.as_str())
            .collect();
        assert_eq!(order, expected, "standings order is wrong");
        self
    }
}
