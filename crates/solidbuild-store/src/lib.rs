//! Durable progress storage for the solidbuild assembly game.
//!
//! The core treats persistence as a simple key/value collaborator with two
//! fixed keys: the append-only set of completed challenge ids
//! ([`COMPLETED_CHALLENGES_KEY`]) and the last-write-wins record of the most
//! recent completion ([`LAST_BUILD_RESULT_KEY`]). Implementations serialize
//! both values as JSON.
//!
//! [`JsonFileStore`] is the file-backed implementation used by a host
//! application; [`MemoryStore`] backs ephemeral sessions and tests.

pub mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Storage key for the set of completed challenge ids.
pub const COMPLETED_CHALLENGES_KEY: &str = "completedChallenges";

/// Storage key for the most recent completion record.
pub const LAST_BUILD_RESULT_KEY: &str = "lastBuildResult";

// ===========================================================================
// Records
// ===========================================================================

/// Snapshot of the most recent level completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub challenge_id: String,
    pub challenge_name: String,
    /// ISO-8601 UTC timestamp of the completion event.
    pub completed_at: String,
    /// Total number of parts the blueprint declared.
    pub part_count: usize,
    /// How the level was completed (currently always `"3d-assembly"`).
    pub method: String,
}

// ===========================================================================
// Store contract
// ===========================================================================

/// Errors raised by a progress store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("serialization error for key '{key}': {detail}")]
    Serialize { key: &'static str, detail: String },

    #[error("store rejected write for key '{key}': {detail}")]
    WriteRejected { key: &'static str, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Durable key/value collaborator consumed by the completion evaluator.
///
/// Writes are fire-and-forget from the core's point of view: a failed write
/// surfaces as a warning and never unwinds in-memory state.
pub trait ProgressStore {
    /// The set of challenge ids ever completed. Missing key reads as empty.
    fn load_completed(&self) -> Result<BTreeSet<String>, StoreError>;

    /// Overwrite the completed-challenge set.
    fn save_completed(&mut self, completed: &BTreeSet<String>) -> Result<(), StoreError>;

    /// Overwrite the most-recent-completion record.
    fn save_last_result(&mut self, record: &CompletionRecord) -> Result<(), StoreError>;
}

// ===========================================================================
// In-memory store
// ===========================================================================

/// Volatile store for ephemeral sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    completed: BTreeSet<String>,
    last_result: Option<CompletionRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_result(&self) -> Option<&CompletionRecord> {
        self.last_result.as_ref()
    }
}

impl ProgressStore for MemoryStore {
    fn load_completed(&self) -> Result<BTreeSet<String>, StoreError> {
        Ok(self.completed.clone())
    }

    fn save_completed(&mut self, completed: &BTreeSet<String>) -> Result<(), StoreError> {
        self.completed = completed.clone();
        Ok(())
    }

    fn save_last_result(&mut self, record: &CompletionRecord) -> Result<(), StoreError> {
        self.last_result = Some(record.clone());
        Ok(())
    }
}

// ===========================================================================
// JSON file store
// ===========================================================================

/// File-backed store writing one JSON file per key under a data directory.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read the last completion record back, if one was ever written.
    pub fn load_last_result(&self) -> Result<Option<CompletionRecord>, StoreError> {
        let path = self.key_path(LAST_BUILD_RESULT_KEY);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        let record =
            serde_json::from_str(&content).map_err(|e| StoreError::Serialize {
                key: LAST_BUILD_RESULT_KEY,
                detail: e.to_string(),
            })?;
        Ok(Some(record))
    }
}

impl ProgressStore for JsonFileStore {
    fn load_completed(&self) -> Result<BTreeSet<String>, StoreError> {
        let path = self.key_path(COMPLETED_CHALLENGES_KEY);
        if !path.exists() {
            return Ok(BTreeSet::new());
        }
        let content = std::fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| StoreError::Serialize {
            key: COMPLETED_CHALLENGES_KEY,
            detail: e.to_string(),
        })
    }

    fn save_completed(&mut self, completed: &BTreeSet<String>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(completed).map_err(|e| StoreError::Serialize {
            key: COMPLETED_CHALLENGES_KEY,
            detail: e.to_string(),
        })?;
        std::fs::write(self.key_path(COMPLETED_CHALLENGES_KEY), json)?;
        Ok(())
    }

    fn save_last_result(&mut self, record: &CompletionRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(record).map_err(|e| StoreError::Serialize {
            key: LAST_BUILD_RESULT_KEY,
            detail: e.to_string(),
        })?;
        std::fs::write(self.key_path(LAST_BUILD_RESULT_KEY), json)?;
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
