use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    /// The game cannot run without at least one vocabulary entry.
    #[error("vocabulary corpus is empty")]
    EmptyCorpus,

    /// Best-score persistence is off; the game keeps the best score in memory.
    #[error("score storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("failed to read corpus {path}: {source}")]
    CorpusRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse corpus: {0}")]
    CorpusParse(#[from] serde_json::Error),
}
