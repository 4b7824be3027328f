//! Best-score persistence.
//!
//! The game only needs a single durable string slot keyed by name. The
//! [`BestScoreStore`] trait is that contract; [`FileStore`] backs it with a
//! JSON file under `~/.flappy/` and [`MemoryStore`] keeps it in memory.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::constants::{BEST_SCORE_KEY, STORE_FILE};
use crate::utils::persistence::save_path;

/// Durable key-value slot for the best score.
pub trait BestScoreStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

impl<T: BestScoreStore + ?Sized> BestScoreStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        (**self).set(key, value)
    }
}

/// Read the persisted best score. Missing or unparsable values count as 0.
pub fn read_best<S: BestScoreStore + ?Sized>(store: &S) -> u32 {
    store
        .get(BEST_SCORE_KEY)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

/// Persist `best` under the best-score key.
pub fn write_best<S: BestScoreStore + ?Sized>(store: &mut S, best: u32) -> io::Result<()> {
    store.set(BEST_SCORE_KEY, &best.to_string())
}

/// In-memory store, used by tests and `--ephemeral` sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.values.insert(key.to_string(), value.to_string());
        store
    }

    /// Number of `set` calls seen so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl BestScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredValue {
    value: String,
    /// Unix timestamp of the last write
    updated_at: i64,
}

/// JSON-file store. The whole map is rewritten on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, StoredValue>,
}

impl FileStore {
    /// Open `~/.flappy/store.json`.
    pub fn open_default() -> io::Result<Self> {
        Self::open(save_path(STORE_FILE)?)
    }

    /// Open a store at `path`. A missing file is an empty store; a corrupt
    /// one is logged and treated as empty so the next write replaces it.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("ignoring unreadable store {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove `key` and rewrite the file.
    pub fn remove(&mut self, key: &str) -> io::Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }
}

impl BestScoreStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|e| e.value.clone())
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(
            key.to_string(),
            StoredValue {
                value: value.to_string(),
                updated_at: chrono::Utc::now().timestamp(),
            },
        );
        self.flush()
    }
}
