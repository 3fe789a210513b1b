use rand::seq::IndexedRandom;
use rand::Rng;

use crate::game::{Game, GameOutcome};
use crate::roster::{Player, RosterGroups};
use crate::stats::models::{AssistEvent, GamePlayerStats, GoalEvent, StatKey};

const FORWARD_GOAL_SHARE: f64 = 0.70;
const DEFENSE_GOAL_SHARE: f64 = 0.25;
const SHORTHANDED_CHANCE: f64 = 0.12;
const SHOOTOUT_AFTER_OVERTIME_CHANCE: f64 = 0.70;
const EMPTY_NET_CHANCE: f64 = 0.50;

/// Plausible final score for one game.
///
/// A tie after the regulation draw goes to overtime; most of those end
/// in a shootout with the tracked score left tied, the rest give one
/// side the extra goal. Empty-net goals can pad a regulation loss.
pub fn simulate_outcome<R: Rng + ?Sized>(rng: &mut R) -> GameOutcome {
    let mut team_goals: u32 = rng.random_range(1..=6);
    let mut opponent_goals: u32 = rng.random_range(1..=6);

    let went_to_overtime = team_goals == opponent_goals;
    let mut shootout_occurred = false;
    if went_to_overtime {
        shootout_occurred = rng.random_bool(SHOOTOUT_AFTER_OVERTIME_CHANCE);
        if !shootout_occurred {
            if rng.random_bool(0.5) {
                team_goals += 1;
            } else {
                opponent_goals += 1;
            }
        }
    }

    let mut empty_net_goals = 0;
    if opponent_goals > team_goals && !went_to_overtime && rng.random_bool(EMPTY_NET_CHANCE) {
        let margin = opponent_goals - team_goals;
        empty_net_goals = rng.random_range(1..=2).min(margin);
    }

    GameOutcome {
        team_goals,
        opponent_goals,
        went_to_overtime,
        shootout_occurred,
        empty_net_goals,
    }
}

/// Synthesizes stat lines consistent with a game's recorded outcome.
///
/// Every roster player gets a line. Goals are distributed one at a
/// time by position weight; assists can come from anyone except the
/// scorer and inherit the goal's shorthanded flag. In a one-goal
/// overtime win the last distributed goal is the overtime goal.
pub fn simulate_game_stats<R: Rng + ?Sized>(
    game: &Game,
    roster: &[Player],
    rng: &mut R,
) -> Vec<GamePlayerStats> {
    let mut lines: Vec<GamePlayerStats> = roster
        .iter()
        .map(|player| {
            GamePlayerStats::zeroed(
                StatKey::Roster(player.id.clone()),
                player.name.clone(),
                player.position.clone(),
            )
        })
        .collect();
    let index: std::collections::HashMap<&str, usize> = roster
        .iter()
        .enumerate()
        .map(|(slot, player)| (player.id.as_str(), slot))
        .collect();

    let groups = RosterGroups::from_players(roster);
    if groups.is_empty() {
        return lines;
    }

    let our_overtime_win = game.went_to_overtime
        && !game.shootout_occurred
        && game.team_goals == game.opponent_goals + 1;

    for goal_number in 0..game.team_goals {
        let Some(scorer) = pick_scorer(&groups, rng) else {
            break;
        };
        let Some(&slot) = index.get(scorer.id.as_str()) else {
            continue;
        };

        let is_shorthanded = rng.random_bool(SHORTHANDED_CHANCE);
        let is_last_goal = goal_number + 1 == game.team_goals;
        lines[slot].goals.push(GoalEvent {
            is_overtime: our_overtime_win && is_last_goal,
            is_shorthanded,
            is_empty_net: false,
        });

        for helper in pick_assisters(roster, &scorer.id, rng) {
            if let Some(&slot) = index.get(helper.id.as_str()) {
                lines[slot].assists.push(AssistEvent { is_shorthanded });
            }
        }
    }

    lines
}

/// Scorers skew heavily toward forwards. An empty position group falls
/// back to anyone who can score.
fn pick_scorer<'a, R: Rng + ?Sized>(groups: &'a RosterGroups, rng: &mut R) -> Option<&'a Player> {
    let roll: f64 = rng.random();
    let bucket = if roll < FORWARD_GOAL_SHARE {
        &groups.forwards
    } else if roll < FORWARD_GOAL_SHARE + DEFENSE_GOAL_SHARE {
        &groups.defensemen
    } else {
        &groups.goalies
    };
    if let Some(player) = bucket.choose(rng) {
        return Some(player);
    }
    let everyone: Vec<&Player> = groups
        .forwards
        .iter()
        .chain(groups.defensemen.iter())
        .chain(groups.goalies.iter())
        .collect();
    everyone.choose(rng).copied()
}

// 0-3 assists per goal: 10% none, 70% one, 15% two, 5% three.
fn assist_count<R: Rng + ?Sized>(rng: &mut R) -> usize {
    let roll: f64 = rng.random();
    if roll < 0.10 {
        0
    } else if roll < 0.80 {
        1
    } else if roll < 0.95 {
        2
    } else {
        3
    }
}

fn pick_assisters<'a, R: Rng + ?Sized>(
    roster: &'a [Player],
    scorer_id: &str,
    rng: &mut R,
) -> Vec<&'a Player> {
    let candidates: Vec<&Player> = roster.iter().filter(|p| p.id != scorer_id).collect();
    if candidates.is_empty() {
        return Vec::new();
    }
    let wanted = assist_count(rng).min(candidates.len());
    candidates.choose_multiple(rng, wanted).copied().collect()
}
