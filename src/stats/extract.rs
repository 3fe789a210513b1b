use serde_json::Value;

// Upstream payloads rename fields between API versions. Every lookup
// walks an alias list and takes the first key present.
pub(super) const PLAYER_ID: &[&str] = &["playerId", "id"];
pub(super) const GOALS: &[&str] = &["goals", "goalsScored", "g"];
pub(super) const ASSISTS: &[&str] = &["assists", "a"];
pub(super) const POSITION: &[&str] = &["position", "positionCode", "pos"];
pub(super) const TEAM_ID: &[&str] = &["teamId", "team"];
pub(super) const SCORE: &[&str] = &["score", "goals"];
pub(super) const SITUATION: &[&str] = &["situationCode", "situation"];
pub(super) const EMPTY_NET: &[&str] = &["emptyNet", "emptyNetGoal"];

pub(super) fn first_value<'a>(node: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    aliases.iter().find_map(|key| node.get(*key))
}

/// Numbers sometimes arrive string-encoded ("8480021").
pub(super) fn first_i64(node: &Value, aliases: &[&str]) -> Option<i64> {
    let value = first_value(node, aliases)?;
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

pub(super) fn first_u32(node: &Value, aliases: &[&str]) -> Option<u32> {
    first_i64(node, aliases).and_then(|n| u32::try_from(n).ok())
}

pub(super) fn first_str<'a>(node: &'a Value, aliases: &[&str]) -> Option<&'a str> {
    first_value(node, aliases)?.as_str()
}

pub(super) fn first_bool(node: &Value, aliases: &[&str]) -> Option<bool> {
    first_value(node, aliases)?.as_bool()
}

/// Strings are sometimes wrapped as `{"default": "..."}` for localization.
fn localized(value: &Value) -> Option<&str> {
    value
        .as_str()
        .or_else(|| value.get("default").and_then(Value::as_str))
}

/// Display name from a stat line: a flat name field when present,
/// otherwise first and last name joined.
pub(super) fn player_name(stat: &Value) -> Option<String> {
    for key in ["name", "fullName"] {
        if let Some(name) = stat.get(key).and_then(localized) {
            let name = name.trim();
            if !name.is_empty() {
                return Some(name.to_string());
            }
        }
    }
    let first = stat.get("firstName").and_then(localized).unwrap_or("");
    let last = stat.get("lastName").and_then(localized).unwrap_or("");
    let joined = format!("{} {}", first, last);
    let joined = joined.trim();
    if joined.is_empty() {
        None
    } else {
        Some(joined.to_string())
    }
}

pub(super) fn stat_last_name(stat: &Value) -> Option<String> {
    if let Some(last) = stat.get("lastName").and_then(localized) {
        let last = last.trim();
        if !last.is_empty() {
            return Some(last.to_string());
        }
    }
    player_name(stat)
        .as_deref()
        .and_then(|name| name.split_whitespace().last().map(str::to_string))
}

pub(super) fn play_period(play: &Value) -> u32 {
    play.get("periodDescriptor")
        .and_then(|d| first_u32(d, &["number", "period"]))
        .or_else(|| first_u32(play, &["period"]))
        .unwrap_or(1)
}

pub(super) fn play_period_type(play: &Value) -> Option<&str> {
    play.get("periodDescriptor")
        .and_then(|d| first_str(d, &["periodType", "type"]))
        .or_else(|| first_str(play, &["periodType"]))
}

/// Shorthanded marker can sit on the play or inside its details.
pub(super) fn play_is_shorthanded(play: &Value) -> bool {
    let nodes = [Some(play), play.get("details")];
    nodes.into_iter().flatten().any(|node| {
        first_str(node, SITUATION)
            .map(|code| code.eq_ignore_ascii_case("sh"))
            .unwrap_or(false)
    })
}

pub(super) fn play_is_empty_net(play: &Value) -> bool {
    let nodes = [play.get("details"), Some(play)];
    nodes
        .into_iter()
        .flatten()
        .any(|node| first_bool(node, EMPTY_NET).unwrap_or(false))
}
