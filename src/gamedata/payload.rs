use serde_json::Value;

/// Raw payload bundle for one game, as fetched from an external feed.
///
/// The interior stays `serde_json::Value` because feed shapes drift between
/// sources and seasons; typed extraction happens field by field in the
/// normalizer, with alias tolerance.
#[derive(Debug, Clone, Default)]
pub struct BoxScorePayload {
    /// Gamecenter box score document.
    pub boxscore: Value,
    /// Landing summary, an alternate home for the player stats section.
    pub landing: Option<Value>,
    /// Chronological play-by-play stream used for flag enrichment.
    pub play_by_play: Option<Value>,
}

impl BoxScorePayload {
    pub fn new(boxscore: Value) -> Self {
        Self {
            boxscore,
            landing: None,
            play_by_play: None,
        }
    }

    pub fn with_landing(mut self, landing: Value) -> Self {
        self.landing = Some(landing);
        self
    }

    pub fn with_play_by_play(mut self, play_by_play: Value) -> Self {
        self.play_by_play = Some(play_by_play);
        self
    }
}

/// What the resolver is handed to score a game from.
#[derive(Debug, Clone)]
pub enum RawGamePayload {
    /// A fetched box score (live or historical), optionally enriched.
    BoxScore(BoxScorePayload),
    /// No external data; stats are synthesized from the roster. Callers opt
    /// in explicitly - simulation is never a silent fallback for real games.
    Simulated,
}
