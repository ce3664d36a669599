//! Best score persistence
//!
//! The only state that survives a process restart. [`JsonFileStore`] keeps it
//! in a JSON object under the `"neonlink_hs"` key, leaving any other keys in the
//! file alone.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub trait BestScoreStore {
    /// Stored best score, 0 when nothing has been stored
    fn read(&self) -> u32;
    fn write(&mut self, score: u32) -> Result<()>;
}

/// Store that lives only as long as the process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    best: u32,
}

impl MemoryStore {
    pub fn new(best: u32) -> Self {
        Self { best }
    }
}

impl BestScoreStore for MemoryStore {
    fn read(&self) -> u32 {
        self.best
    }

    fn write(&mut self, score: u32) -> Result<()> {
        self.best = score;
        Ok(())
    }
}

/// On-disk layout of the best score file
#[derive(Debug, Default, Serialize, Deserialize)]
struct BestScoreFile {
    #[serde(rename = "neonlink_hs", default)]
    best: u32,
    #[serde(flatten)]
    other: Map<String, Value>,
}

/// Best score kept in a small JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    best: u32,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing or unreadable file reads as 0.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = match load(&path) {
            Ok(file) => file.best,
            Err(e) => {
                if path.exists() {
                    eprintln!("[BestScore] Ignoring {}: {:#}", path.display(), e);
                }
                0
            }
        };
        Self { path, best }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn load(path: &Path) -> Result<BestScoreFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

impl BestScoreStore for JsonFileStore {
    fn read(&self) -> u32 {
        self.best
    }

    fn write(&mut self, score: u32) -> Result<()> {
        let mut file = load(&self.path).unwrap_or_default();
        file.best = score;

        let text = serde_json::to_string_pretty(&file).context("failed to encode best score")?;
        std::fs::write(&self.path, text)
            .with_context(|| format!("failed to write {}", self.path.display()))?;

        self.best = score;
        Ok(())
    }
}
