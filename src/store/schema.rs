use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// Fixed storage key for the best score document.
pub const BEST_SCORE_KEY: &str = "best_score.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BestScoreData {
    pub schema_version: u32,
    pub best_score: u32,
    #[serde(default)]
    pub achieved_at: Option<DateTime<Utc>>,
}

impl Default for BestScoreData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            best_score: 0,
            achieved_at: None,
        }
    }
}

impl BestScoreData {
    /// Check if loaded data has a stale schema version and should be ignored.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}
