use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::GameError;
use crate::store::schema::{BEST_SCORE_KEY, BestScoreData};

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self, GameError> {
        let base_dir = dirs::data_dir()
            .ok_or_else(|| GameError::StorageUnavailable("no data directory".to_string()))?
            .join("typefall");
        Self::with_base_dir(base_dir)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self, GameError> {
        fs::create_dir_all(&base_dir).map_err(|e| {
            GameError::StorageUnavailable(format!("{}: {e}", base_dir.display()))
        })?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Missing or unparseable files read as the default value.
    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => T::default(),
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<(), GameError> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let write = || -> std::io::Result<()> {
            let json = serde_json::to_string_pretty(data)?;
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp_path, &path)
        };
        write().map_err(|e| GameError::StorageUnavailable(format!("{}: {e}", path.display())))
    }

    pub fn load_best_score(&self) -> BestScoreData {
        let data: BestScoreData = self.load(BEST_SCORE_KEY);
        if data.needs_reset() {
            BestScoreData::default()
        } else {
            data
        }
    }

    pub fn save_best_score(&self, data: &BestScoreData) -> Result<(), GameError> {
        self.save(BEST_SCORE_KEY, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_default() {
        let dir = tempdir().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.load_best_score(), BestScoreData::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let data = BestScoreData {
            best_score: 17,
            ..BestScoreData::default()
        };
        store.save_best_score(&data).unwrap();
        assert_eq!(store.load_best_score().best_score, 17);
        assert!(!dir.path().join("best_score.tmp").exists());
    }

    #[test]
    fn garbage_file_loads_default() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(BEST_SCORE_KEY), "not json").unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.load_best_score().best_score, 0);
    }

    #[test]
    fn stale_schema_is_ignored() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(BEST_SCORE_KEY),
            r#"{"schema_version": 99, "best_score": 50}"#,
        )
        .unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.load_best_score().best_score, 0);
    }

    #[test]
    fn unwritable_base_dir_is_storage_unavailable() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let result = JsonStore::with_base_dir(blocker.join("sub"));
        assert!(matches!(result, Err(GameError::StorageUnavailable(_))));
    }
}
