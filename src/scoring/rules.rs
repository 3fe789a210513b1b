use tracing::warn;

use crate::game::GameOutcome;
use crate::roster::ScoringRole;
use crate::stats::{AssistEvent, GamePlayerStats, GoalEvent};

// Point values per position
pub const FORWARD_GOAL: i32 = 2;
pub const FORWARD_OVERTIME_GOAL: i32 = 7;
pub const DEFENSE_GOAL: i32 = 3;
pub const DEFENSE_OVERTIME_GOAL: i32 = 8;
pub const SKATER_ASSIST: i32 = 1;
pub const GOALIE_SHUTOUT: i32 = 5;
pub const GOALIE_STRONG_GAME: i32 = 3;
pub const GOALIE_ASSIST: i32 = 5;
pub const SHORTHANDED_MULTIPLIER: i32 = 2;
/// Team goals must exceed this for the collective bonus to pay out.
pub const TEAM_BONUS_THRESHOLD: u32 = 3;

/// 2 for a forward's goal, 7 in overtime, doubled when shorthanded.
pub fn forward_goal_points(goal: &GoalEvent) -> i32 {
    let mut points = if goal.is_overtime {
        FORWARD_OVERTIME_GOAL
    } else {
        FORWARD_GOAL
    };
    if goal.is_shorthanded {
        points *= SHORTHANDED_MULTIPLIER;
    }
    points
}

/// 3 for a defenseman's goal, 8 in overtime, doubled when shorthanded.
pub fn defense_goal_points(goal: &GoalEvent) -> i32 {
    let mut points = if goal.is_overtime {
        DEFENSE_OVERTIME_GOAL
    } else {
        DEFENSE_GOAL
    };
    if goal.is_shorthanded {
        points *= SHORTHANDED_MULTIPLIER;
    }
    points
}

/// 1 per assist for any skater, doubled when shorthanded.
pub fn skater_assist_points(assist: &AssistEvent) -> i32 {
    if assist.is_shorthanded {
        SKATER_ASSIST * SHORTHANDED_MULTIPLIER
    } else {
        SKATER_ASSIST
    }
}

/// Goalie scoring runs off the whole game, not individual events:
/// 5 for a shutout, 3 for one or two against, nothing for three plus,
/// and 5 per assist. Empty-net goals were scored into a vacated net
/// and never count against the goalie. Goalie goals are worth nothing.
pub fn goalie_points(stats: &GamePlayerStats, outcome: &GameOutcome) -> i32 {
    let goals_against = outcome
        .opponent_goals
        .saturating_sub(outcome.empty_net_goals);

    let mut points = match goals_against {
        0 => GOALIE_SHUTOUT,
        1 | 2 => GOALIE_STRONG_GAME,
        _ => 0,
    };
    points += stats.assists.len() as i32 * GOALIE_ASSIST;
    points
}

/// Full team-goal count once the team clears the threshold, else nothing.
pub fn team_bonus_points(team_goals: u32) -> i32 {
    if team_goals > TEAM_BONUS_THRESHOLD {
        team_goals as i32
    } else {
        0
    }
}

/// Total points for one player's game, dispatched by position.
/// Positions with no scoring rule are worth nothing.
pub fn player_points(stats: &GamePlayerStats, outcome: &GameOutcome) -> i32 {
    let Some(role) = stats.position.role() else {
        warn!(
            player = %stats.player,
            position = %stats.position,
            "No scoring rule for position"
        );
        return 0;
    };

    match role {
        ScoringRole::Forward => {
            stats.goals.iter().map(forward_goal_points).sum::<i32>()
                + stats.assists.iter().map(skater_assist_points).sum::<i32>()
        }
        ScoringRole::Defense => {
            stats.goals.iter().map(defense_goal_points).sum::<i32>()
                + stats.assists.iter().map(skater_assist_points).sum::<i32>()
        }
        ScoringRole::Goalie => goalie_points(stats, outcome),
    }
}
