use serde_json::{json, Value};

use lamplighter::game::GameOutcome;
use lamplighter::gamedata::{BoxScorePayload, RawGamePayload};

// ============================================================================
// Outcome Shorthands
// ============================================================================

pub fn regulation(team_goals: u32, opponent_goals: u32) -> GameOutcome {
    GameOutcome {
        team_goals,
        opponent_goals,
        went_to_overtime: false,
        shootout_occurred: false,
        empty_net_goals: 0,
    }
}

pub fn overtime(team_goals: u32, opponent_goals: u32) -> GameOutcome {
    GameOutcome {
        team_goals,
        opponent_goals,
        went_to_overtime: true,
        shootout_occurred: false,
        empty_net_goals: 0,
    }
}

// ============================================================================
// Box Score Builder
// ============================================================================

/// Builds a home-side box score payload shaped like the live feed:
/// team nodes with scores, nested player groups, optional play-by-play.
pub struct BoxScoreBuilder {
    team_score: u32,
    opponent_score: u32,
    forwards: Vec<Value>,
    defense: Vec<Value>,
    goalies: Vec<Value>,
    plays: Vec<Value>,
}

impl BoxScoreBuilder {
    pub fn new() -> Self {
        Self {
            team_score: 0,
            opponent_score: 0,
            forwards: vec![],
            defense: vec![],
            goalies: vec![],
            plays: vec![],
        }
    }

    pub fn final_score(mut self, team: u32, opponent: u32) -> Self {
        self.team_score = team;
        self.opponent_score = opponent;
        self
    }

    pub fn forward(mut self, external_id: i64, goals: u32, assists: u32) -> Self {
        self.forwards.push(stat_line(external_id, goals, assists, "C"));
        self
    }

    /// Raw forward stat line, for shapes the shorthand cannot express.
    pub fn forward_line(mut self, line: Value) -> Self {
        self.forwards.push(line);
        self
    }

    pub fn defenseman(mut self, external_id: i64, goals: u32, assists: u32) -> Self {
        self.defense.push(stat_line(external_id, goals, assists, "D"));
        self
    }

    pub fn goalie(mut self, external_id: i64) -> Self {
        self.goalies.push(stat_line(external_id, 0, 0, "G"));
        self
    }

    /// Append a play-by-play goal for the tracked team. Period 4 or
    /// higher is overtime; situation "SH" marks it shorthanded.
    pub fn goal_play(mut self, scorer: i64, assists: &[i64], period: u32, situation: &str) -> Self {
        let period_type = if period > 3 { "OT" } else { "REG" };
        self.plays.push(json!({
            "typeDescKey": "goal",
            "periodDescriptor": { "number": period, "periodType": period_type },
            "situationCode": situation,
            "details": {
                "eventOwnerTeamId": 17,
                "scoringPlayerId": scorer,
                "assistPlayerIds": assists,
            }
        }));
        self
    }

    pub fn build(self) -> RawGamePayload {
        let root = json!({
            "homeTeam": { "id": 17, "abbrev": "DET", "score": self.team_score },
            "awayTeam": { "id": 16, "abbrev": "CHI", "score": self.opponent_score },
            "playerByGameStats": {
                "homeTeam": {
                    "forwards": self.forwards,
                    "defense": self.defense,
                    "goalies": self.goalies,
                }
            }
        });
        let mut payload = BoxScorePayload::new(root);
        if !self.plays.is_empty() {
            payload = payload.with_play_by_play(json!({ "plays": self.plays }));
        }
        RawGamePayload::BoxScore(payload)
    }
}

fn stat_line(external_id: i64, goals: u32, assists: u32, position: &str) -> Value {
    json!({
        "playerId": external_id,
        "goals": goals,
        "assists": assists,
        "position": position,
    })
}
