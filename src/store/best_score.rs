use chrono::Utc;
use tracing::{info, warn};

use crate::error::GameError;
use crate::store::json_store::JsonStore;
use crate::store::schema::BestScoreData;

/// Best score across sessions. Without a store it only lasts for this session.
pub struct BestScore {
    data: BestScoreData,
    store: Option<JsonStore>,
}

impl BestScore {
    /// Load from the default data directory, degrading to session-only.
    pub fn load() -> Self {
        Self::from_store(JsonStore::new())
    }

    pub fn from_store(store: Result<JsonStore, GameError>) -> Self {
        match store {
            Ok(store) => {
                let data = store.load_best_score();
                Self {
                    data,
                    store: Some(store),
                }
            }
            Err(err) => {
                warn!(%err, "best score will not be saved");
                Self::session_only()
            }
        }
    }

    pub fn session_only() -> Self {
        Self {
            data: BestScoreData::default(),
            store: None,
        }
    }

    pub fn get(&self) -> u32 {
        self.data.best_score
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    /// Returns true when `score` set a new record.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.data.best_score {
            return false;
        }
        self.data.best_score = score;
        self.data.achieved_at = Some(Utc::now());
        info!(score, "new best score");

        if let Some(ref store) = self.store {
            if let Err(err) = store.save_best_score(&self.data) {
                warn!(%err, "dropping best score persistence for this session");
                self.store = None;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn record_only_when_higher() {
        let dir = tempdir().unwrap();
        let mut best = BestScore::from_store(JsonStore::with_base_dir(dir.path().to_path_buf()));
        assert_eq!(best.get(), 0);
        assert!(best.record(3));
        assert!(!best.record(3));
        assert!(!best.record(1));
        assert_eq!(best.get(), 3);
    }

    #[test]
    fn persists_across_loads() {
        let dir = tempdir().unwrap();
        let mut best = BestScore::from_store(JsonStore::with_base_dir(dir.path().to_path_buf()));
        best.record(8);

        let reloaded = BestScore::from_store(JsonStore::with_base_dir(dir.path().to_path_buf()));
        assert!(reloaded.is_persistent());
        assert_eq!(reloaded.get(), 8);
    }

    #[test]
    fn storage_failure_degrades_to_session_only() {
        let mut best = BestScore::from_store(Err(GameError::StorageUnavailable(
            "read-only".to_string(),
        )));
        assert!(!best.is_persistent());
        assert!(best.record(2));
        assert_eq!(best.get(), 2);
    }
}
