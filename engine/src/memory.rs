//! Memory bank persistence
//!
//! Durable key-value store backed by a single JSON document on disk.
//! The whole document is loaded into memory at construction and rewritten
//! in full after every mutation; there is no transaction log and no
//! record-level locking, so a single writer per file is assumed.
//!
//! The reserved `content_history` key holds an append-only list of
//! content records: the pipeline only ever appends, never mutates or
//! removes entries (`clear_all` exists for operators, not the pipeline).

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// JSON-document-backed durable store
#[derive(Debug)]
pub struct MemoryBank {
    path: PathBuf,
    data: Map<String, Value>,
}

impl MemoryBank {
    /// Open (or create) the store at `path`.
    ///
    /// A missing or corrupt backing file is treated as an empty store
    /// rather than a construction failure; the parent directory is
    /// created if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create memory directory {:?}", parent))?;
        }

        let data = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(Value::Object(map)) => map,
                Ok(_) | Err(_) => {
                    warn!("Memory file {:?} is corrupt, starting empty", path);
                    Map::new()
                }
            },
            Err(_) => {
                debug!("No memory file at {:?}, starting empty", path);
                Map::new()
            }
        };

        Ok(Self { path, data })
    }

    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&Value::Object(self.data.clone()))
            .context("Failed to serialize memory bank")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write memory file {:?}", self.path))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Set a key and rewrite the backing file.
    pub fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.data.insert(key.to_string(), value);
        self.persist()
    }

    /// Delete a key. The file is only rewritten when the key existed.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        if self.data.remove(key).is_some() {
            self.persist()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Drop every key and rewrite the (now empty) document.
    pub fn clear_all(&mut self) -> Result<()> {
        self.data.clear();
        self.persist()
    }

    /// Append `value` to the list stored under `key`.
    ///
    /// An absent key is initialized to an empty list. A non-list existing
    /// value is first coerced into a single-element list (tolerates older
    /// documents that stored a scalar under the key).
    pub fn append_to_history(&mut self, key: &str, value: Value) -> Result<()> {
        let entry = self
            .data
            .entry(key.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));

        if !entry.is_array() {
            let old = entry.take();
            *entry = Value::Array(vec![old]);
        }

        if let Value::Array(list) = entry {
            list.push(value);
        }

        self.persist()
    }

    /// The last `limit` history elements in insertion order, or the full
    /// list when no limit is given. An absent or non-list key yields an
    /// empty vec.
    pub fn get_history(&self, key: &str, limit: Option<usize>) -> Vec<Value> {
        let list = match self.data.get(key).and_then(Value::as_array) {
            Some(list) => list,
            None => return Vec::new(),
        };

        match limit {
            Some(n) if n < list.len() => list[list.len() - n..].to_vec(),
            _ => list.clone(),
        }
    }

    /// Snapshot copy of the whole document.
    pub fn get_all(&self) -> Map<String, Value> {
        self.data.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
