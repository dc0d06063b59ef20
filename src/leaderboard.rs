//! Persisted list of finished runs.
//!
//! Records live under one key of a string key-value store as a JSON array,
//! oldest first. Every append rewrites the whole list.

use crate::error::Result;
use crate::stopwatch::format_record_time;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const LEADERBOARD_KEY: &str = "leaderboardData";
pub const DEFAULT_PLAYER: &str = "Player";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    /// Seconds
    pub time: f64,
}

/// String key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

/// Key-value store backed by a single JSON object on disk.
pub struct JsonFileStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store; a missing file, or one that is not a JSON object,
    /// starts empty.
    pub fn open(path: &Path) -> Result<Self> {
        let entries = match fs::read(path) {
            Ok(content) => match serde_json::from_slice::<Map<String, Value>>(&content) {
                Ok(map) => map,
                Err(e) => {
                    log::warn!("ignoring malformed store {}: {}", path.display(), e);
                    Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pianotype")
            .join("storage.json")
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), Value::String(value));
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

pub struct Leaderboard<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Leaderboard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All records in completion order. Absent or malformed data reads as empty.
    pub fn load(&self) -> Vec<Record> {
        let Some(raw) = self.store.get(LEADERBOARD_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("discarding malformed leaderboard data: {}", e);
                Vec::new()
            }
        }
    }

    pub fn append(&mut self, record: Record) -> Result<()> {
        let mut records = self.load();
        log::info!("recording {} in {:.2}s", record.name, record.time);
        records.push(record);
        self.store
            .set(LEADERBOARD_KEY, serde_json::to_string(&records)?)
    }

    /// Fastest first; equal times keep completion order.
    pub fn ranked(&self) -> Vec<Record> {
        let mut records = self.load();
        records.sort_by(|a, b| a.time.total_cmp(&b.time));
        records
    }
}

/// Plain-text listing used after a run and by the `scores` command.
pub fn render_table(records: &[Record], limit: usize, highlight: Option<&Record>) -> String {
    if records.is_empty() {
        return "No runs recorded yet.\n".to_string();
    }

    let name_width = records
        .iter()
        .take(limit)
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut out = format!("{:>3}  {:<name_width$}  {:>8}\n", "#", "Name", "Time");
    for (i, record) in records.iter().take(limit).enumerate() {
        let marker = if highlight == Some(record) { " <" } else { "" };
        out.push_str(&format!(
            "{:>3}  {:<name_width$}  {:>8}{}\n",
            i + 1,
            record.name,
            format_record_time(record.time),
            marker
        ));
    }
    out
}

#[cfg(test)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: std::collections::HashMap::new(),
        }
    }

    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}
