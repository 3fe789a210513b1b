use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::PoolConfig;
use crate::game::{Game, GameOutcome};
use crate::gamedata::BoxScorePayload;
use crate::roster::{Player, Position};
use crate::stats::extract;
use crate::stats::models::{AssistEvent, GamePlayerStats, GoalEvent, NormalizeResult, StatKey};

/// Turns raw upstream payloads into canonical per-player stat lines.
///
/// The normalizer never fails on malformed fields: it degrades with
/// warnings and keeps whatever it could read. The only non-ready outcome
/// is a payload that has no player stats section at all.
#[derive(Debug, Clone)]
pub struct StatNormalizer {
    config: PoolConfig,
}

/// Goal and assist flags recovered from play-by-play, keyed by the
/// upstream numeric player id, in chronological order.
#[derive(Debug, Default)]
struct PlaySummary {
    goal_flags: HashMap<i64, Vec<GoalEvent>>,
    assist_flags: HashMap<i64, Vec<AssistEvent>>,
    opponent_empty_net: u32,
    saw_overtime: bool,
    saw_shootout: bool,
}

impl StatNormalizer {
    pub fn new(config: PoolConfig) -> Self {
        StatNormalizer { config }
    }

    /// Reads the final score and overtime markers out of a payload.
    ///
    /// Returns `None` when the payload carries no team data at all.
    /// Empty-net goals against can only be counted when play-by-play
    /// is present; without it the count stays zero.
    pub fn extract_outcome(&self, payload: &BoxScorePayload, is_home: bool) -> Option<GameOutcome> {
        let root = boxscore_root(payload);
        let (ours, theirs) = self.pick_sides(root, is_home);
        if ours.is_none() && theirs.is_none() {
            return None;
        }

        let mut team_goals = ours
            .and_then(|team| extract::first_u32(team, extract::SCORE))
            .unwrap_or(0);
        let mut opponent_goals = theirs
            .and_then(|team| extract::first_u32(team, extract::SCORE))
            .unwrap_or(0);

        let mut went_to_overtime = false;
        let mut shootout_occurred = false;
        let period_type = root
            .get("periodDescriptor")
            .and_then(|d| extract::first_str(d, &["periodType", "type"]))
            .or_else(|| {
                root.get("gameOutcome")
                    .and_then(|o| extract::first_str(o, &["lastPeriodType"]))
            });
        if let Some(period_type) = period_type {
            went_to_overtime =
                period_type.eq_ignore_ascii_case("ot") || period_type.eq_ignore_ascii_case("so");
            shootout_occurred = period_type.eq_ignore_ascii_case("so");
        }

        let mut empty_net_goals = 0;
        if let Some(pbp) = play_by_play(payload) {
            if let Some(our_id) = self.our_team_id(root, is_home) {
                let summary = summarize_plays(pbp, our_id);
                went_to_overtime = went_to_overtime || summary.saw_overtime;
                shootout_occurred = shootout_occurred || summary.saw_shootout;
                empty_net_goals = summary.opponent_empty_net;
            }
        }

        // Feeds fold the shootout decider into the winner's score. The
        // tracked score is the regulation/overtime figure, which is tied.
        if shootout_occurred && team_goals != opponent_goals {
            if team_goals > opponent_goals {
                team_goals -= 1;
            } else {
                opponent_goals -= 1;
            }
        }

        Some(GameOutcome {
            team_goals,
            opponent_goals,
            went_to_overtime,
            shootout_occurred,
            empty_net_goals,
        })
    }

    /// Builds the canonical stat lines for one game.
    ///
    /// Output order is roster order first (every roster player gets a
    /// line, producing or not), then unmatched lines in payload order.
    #[instrument(skip(self, game, payload, roster), fields(game_id = %game.id))]
    pub fn normalize(
        &self,
        game: &Game,
        payload: &BoxScorePayload,
        roster: &[Player],
    ) -> NormalizeResult {
        let Some(section) = stats_section(payload) else {
            info!("Box score has no player stats section yet");
            return NormalizeResult::StatsNotReady;
        };

        let root = boxscore_root(payload);
        let our_team_id = self.our_team_id(root, game.is_home);

        let pbp = play_by_play(payload);
        let summary = match (pbp, our_team_id) {
            (Some(pbp), Some(our_id)) => summarize_plays(pbp, our_id),
            (Some(_), None) => {
                debug!("Play-by-play present but team id unknown, skipping goal flags");
                PlaySummary::default()
            }
            (None, _) => PlaySummary::default(),
        };

        let mut lines: Vec<GamePlayerStats> = Vec::with_capacity(roster.len());
        let mut index: HashMap<StatKey, usize> = HashMap::new();
        let mut filled: HashSet<usize> = HashSet::new();
        for player in roster {
            let key = StatKey::Roster(player.id.clone());
            index.insert(key.clone(), lines.len());
            lines.push(GamePlayerStats::zeroed(
                key,
                player.name.clone(),
                player.position.clone(),
            ));
        }

        let mut unmatched = 0usize;
        for stat in collect_stat_lines(section, game, our_team_id) {
            let ext_id = extract::first_i64(stat, extract::PLAYER_ID);
            let matched = self.match_roster(roster, stat);
            let key = match (matched, ext_id) {
                (Some(player), _) => StatKey::Roster(player.id.clone()),
                (None, Some(ext)) => StatKey::External(ext),
                (None, None) => {
                    warn!("Dropping stat line with no usable player id");
                    continue;
                }
            };
            if matched.is_none() {
                unmatched += 1;
            }

            let position = match matched {
                Some(player) => player.position.clone(),
                None => extract::first_str(stat, extract::POSITION)
                    .map(Position::from_code)
                    .unwrap_or_else(|| Position::Unknown(String::new())),
            };
            let name = match matched {
                Some(player) => player.name.clone(),
                None => extract::player_name(stat).unwrap_or_else(|| key.to_string()),
            };

            let goals_count = extract::first_u32(stat, extract::GOALS).unwrap_or(0) as usize;
            let assists_count = extract::first_u32(stat, extract::ASSISTS).unwrap_or(0) as usize;

            // Play-by-play is keyed by the upstream id; a roster match can
            // still reach its flags through the player's external id.
            let flag_key = ext_id.or_else(|| matched.and_then(|p| p.external_id));
            let goal_flags = flag_key.and_then(|id| summary.goal_flags.get(&id));
            let assist_flags = flag_key.and_then(|id| summary.assist_flags.get(&id));

            let mut line = GamePlayerStats::zeroed(key.clone(), name, position);
            for i in 0..goals_count {
                let event = goal_flags
                    .and_then(|flags| flags.get(i).copied())
                    .unwrap_or_else(GoalEvent::regulation);
                line.goals.push(event);
            }
            for i in 0..assists_count {
                let event = assist_flags
                    .and_then(|flags| flags.get(i).copied())
                    .unwrap_or_else(AssistEvent::even_strength);
                line.assists.push(event);
            }

            match index.get(&key) {
                Some(&slot) => {
                    if !filled.insert(slot) {
                        debug!(player = %key, "Duplicate stat line, keeping the latest");
                    }
                    lines[slot] = line;
                }
                None => {
                    filled.insert(lines.len());
                    index.insert(key, lines.len());
                    lines.push(line);
                }
            }
        }

        // Without play-by-play the overtime goal cannot be attributed
        // directly. A one-goal overtime win pins it on the last goal of
        // the last producing line; anything else leaves no goal flagged.
        if pbp.is_none()
            && game.went_to_overtime
            && !game.shootout_occurred
            && game.team_goals == game.opponent_goals + 1
        {
            if let Some(line) = lines.iter_mut().rev().find(|line| !line.goals.is_empty()) {
                if let Some(goal) = line.goals.last_mut() {
                    goal.is_overtime = true;
                    debug!(player = %line.player, "Attributed overtime goal without play-by-play");
                }
            }
        }

        debug!(players = lines.len(), unmatched, "Normalized player stats");
        NormalizeResult::Ready(lines)
    }

    /// Home and away sides ordered as (ours, theirs). Team metadata
    /// matching the configured team wins over the home flag.
    fn pick_sides<'a>(
        &self,
        root: &'a Value,
        is_home: bool,
    ) -> (Option<&'a Value>, Option<&'a Value>) {
        let home = root.get("homeTeam");
        let away = root.get("awayTeam");
        if self.matches_config(home) {
            return (home, away);
        }
        if self.matches_config(away) {
            return (away, home);
        }
        if is_home {
            (home, away)
        } else {
            (away, home)
        }
    }

    fn matches_config(&self, team: Option<&Value>) -> bool {
        let Some(team) = team else {
            return false;
        };
        if let (Some(configured), Some(id)) = (
            self.config.team_external_id,
            extract::first_i64(team, &["id", "teamId"]),
        ) {
            if configured == id {
                return true;
            }
        }
        extract::first_str(team, &["abbrev", "triCode", "teamAbbrev"])
            .map(|abbrev| abbrev.eq_ignore_ascii_case(&self.config.team_abbrev))
            .unwrap_or(false)
    }

    fn our_team_id(&self, root: &Value, is_home: bool) -> Option<i64> {
        let (ours, _) = self.pick_sides(root, is_home);
        ours.and_then(|team| extract::first_i64(team, &["id", "teamId"]))
    }

    /// Roster match order: external id, roster id, full name, last name.
    fn match_roster<'a>(&self, roster: &'a [Player], stat: &Value) -> Option<&'a Player> {
        if let Some(ext) = extract::first_i64(stat, extract::PLAYER_ID) {
            if let Some(player) = roster.iter().find(|p| p.external_id == Some(ext)) {
                return Some(player);
            }
        }
        if let Some(sid) = extract::first_str(stat, extract::PLAYER_ID) {
            if let Some(player) = roster.iter().find(|p| p.id == sid) {
                return Some(player);
            }
        }
        if let Some(name) = extract::player_name(stat) {
            if let Some(player) = roster.iter().find(|p| p.name.eq_ignore_ascii_case(&name)) {
                return Some(player);
            }
        }
        if let Some(last) = extract::stat_last_name(stat) {
            if let Some(player) = roster
                .iter()
                .find(|p| p.last_name().eq_ignore_ascii_case(&last))
            {
                return Some(player);
            }
        }
        None
    }
}

/// Some feeds wrap the box score in an outer `boxscore` envelope.
fn boxscore_root(payload: &BoxScorePayload) -> &Value {
    payload.boxscore.get("boxscore").unwrap_or(&payload.boxscore)
}

fn play_by_play(payload: &BoxScorePayload) -> Option<&Value> {
    payload
        .play_by_play
        .as_ref()
        .or_else(|| payload.boxscore.get("playByPlay"))
}

/// Player stats live in one of three places depending on feed version.
fn stats_section(payload: &BoxScorePayload) -> Option<&Value> {
    payload
        .boxscore
        .get("playerByGameStats")
        .or_else(|| {
            payload
                .boxscore
                .get("boxscore")
                .and_then(|b| b.get("playerByGameStats"))
        })
        .or_else(|| {
            payload
                .landing
                .as_ref()
                .and_then(|l| l.get("boxscore"))
                .and_then(|b| b.get("playerByGameStats"))
        })
}

/// Raw stat lines for our side. Nested sections split home and away
/// into position groups; flat sections carry a team id per line.
fn collect_stat_lines<'a>(section: &'a Value, game: &Game, our_team_id: Option<i64>) -> Vec<&'a Value> {
    if let Some(flat) = section.as_array() {
        return flat
            .iter()
            .filter(
                |stat| match (our_team_id, extract::first_i64(stat, extract::TEAM_ID)) {
                    (Some(ours), Some(team)) => team == ours,
                    _ => true,
                },
            )
            .collect();
    }

    let side_key = if game.is_home { "homeTeam" } else { "awayTeam" };
    let Some(side) = section.get(side_key) else {
        return Vec::new();
    };
    const GROUPS: [&str; 4] = ["forwards", "defense", "defensemen", "goalies"];
    let mut lines = Vec::new();
    for group in GROUPS {
        if let Some(entries) = side.get(group).and_then(Value::as_array) {
            lines.extend(entries.iter());
        }
    }
    lines
}

fn summarize_plays(pbp: &Value, our_team_id: i64) -> PlaySummary {
    let mut summary = PlaySummary::default();
    let Some(plays) =
        extract::first_value(pbp, &["plays", "playsAllPlays", "allPlays"]).and_then(Value::as_array)
    else {
        return summary;
    };

    for play in plays {
        let period_type = extract::play_period_type(play);
        if period_type
            .map(|t| t.eq_ignore_ascii_case("so"))
            .unwrap_or(false)
        {
            // Shootout attempts are not goals and never reach stat lines.
            summary.saw_shootout = true;
            summary.saw_overtime = true;
            continue;
        }

        let is_overtime = extract::play_period(play) > 3
            || period_type
                .map(|t| t.eq_ignore_ascii_case("ot"))
                .unwrap_or(false);
        if is_overtime {
            summary.saw_overtime = true;
        }

        let is_goal = extract::first_str(play, &["typeDescKey", "eventType", "type"])
            .map(|t| t.eq_ignore_ascii_case("goal"))
            .unwrap_or(false);
        if !is_goal {
            continue;
        }

        let details = play.get("details");
        let team_id = details
            .and_then(|d| extract::first_i64(d, &["eventOwnerTeamId"]))
            .or_else(|| extract::first_i64(play, extract::TEAM_ID));
        let is_empty_net = extract::play_is_empty_net(play);
        if team_id != Some(our_team_id) {
            if is_empty_net {
                summary.opponent_empty_net += 1;
            }
            continue;
        }

        let scorer = details
            .and_then(|d| extract::first_i64(d, &["scoringPlayerId"]))
            .or_else(|| extract::first_i64(play, extract::PLAYER_ID));
        let Some(scorer) = scorer else {
            continue;
        };

        let is_shorthanded = extract::play_is_shorthanded(play);
        summary.goal_flags.entry(scorer).or_default().push(GoalEvent {
            is_overtime,
            is_shorthanded,
            is_empty_net,
        });
        for assist in assist_ids(play) {
            summary
                .assist_flags
                .entry(assist)
                .or_default()
                .push(AssistEvent { is_shorthanded });
        }
    }
    summary
}

fn assist_ids(play: &Value) -> Vec<i64> {
    let Some(details) = play.get("details") else {
        return Vec::new();
    };
    if let Some(ids) = details.get("assistPlayerIds").and_then(Value::as_array) {
        return ids.iter().filter_map(Value::as_i64).collect();
    }
    ["assist1PlayerId", "assist2PlayerId"]
        .into_iter()
        .filter_map(|key| extract::first_i64(details, &[key]))
        .collect()
}
