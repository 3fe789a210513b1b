use serde::{Deserialize, Serialize};

/// Identity of the tracked team.
///
/// Every game in the pool belongs to this team; payload sides and stat lines
/// are attributed against it. Held by value wherever it is needed, never as
/// global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Team abbreviation as stat feeds report it (e.g. "DET").
    pub team_abbrev: String,
    /// Numeric team id used by external feeds, when known.
    pub team_external_id: Option<i64>,
    /// Display name for logs and standings output.
    pub team_name: String,
}

impl PoolConfig {
    /// Reads the pool's team identity from the environment, falling back to
    /// the Detroit pool this engine was first built for.
    ///
    /// Variables: `POOL_TEAM_ABBREV`, `POOL_TEAM_ID`, `POOL_TEAM_NAME`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            team_abbrev: std::env::var("POOL_TEAM_ABBREV").unwrap_or(defaults.team_abbrev),
            team_external_id: std::env::var("POOL_TEAM_ID")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .or(defaults.team_external_id),
            team_name: std::env::var("POOL_TEAM_NAME").unwrap_or(defaults.team_name),
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            team_abbrev: "DET".to_string(),
            team_external_id: Some(17),
            team_name: "Red Wings".to_string(),
        }
    }
}
