use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR_NAME: &str = "wrap-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Errors raised by a [`ScoreStore`].
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("score file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

/// Persists the best score across runs.
pub trait ScoreStore {
    /// Returns the stored best, `0` when nothing has been stored yet.
    fn load(&self) -> Result<u32, ScoreError>;

    fn save(&mut self, score: u32) -> Result<(), ScoreError>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// JSON file store holding `{ "high_score": n }`.
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at [`scores_path`].
    #[must_use]
    pub fn at_default_path() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonScoreStore {
    fn load(&self) -> Result<u32, ScoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let file: ScoreFile = serde_json::from_str(&raw)?;
        Ok(file.high_score)
    }

    fn save(&mut self, score: u32) -> Result<(), ScoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&ScoreFile { high_score: score })?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-process store, used by tests and when persistence is disabled.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    high_score: Option<u32>,
    saves: usize,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score: Some(high_score),
            saves: 0,
        }
    }

    /// Number of successful `save` calls.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<u32, ScoreError> {
        Ok(self.high_score.unwrap_or(0))
    }

    fn save(&mut self, score: u32) -> Result<(), ScoreError> {
        self.high_score = Some(score);
        self.saves += 1;
        Ok(())
    }
}

/// Compares reported scores against the stored best and persists new bests.
#[derive(Debug)]
pub struct HighScoreTracker<S> {
    store: S,
    best: u32,
}

impl<S: ScoreStore> HighScoreTracker<S> {
    /// Loads the previous best; a failed load is logged and treated as `0`.
    pub fn load(store: S) -> Self {
        let best = match store.load() {
            Ok(best) => best,
            Err(error) => {
                warn!("could not load high score, starting from 0: {error}");
                0
            }
        };

        Self { store, best }
    }

    #[must_use]
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Records `score`; persists it when it beats the best. Returns true on a new best.
    pub fn report(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }

        self.best = score;
        if let Err(error) = self.store.save(score) {
            warn!("failed to save high score {score}: {error}");
        } else {
            info!("new high score {score}");
        }
        true
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
