//! Session management
//!
//! Ephemeral per-run state. A session is created when a pipeline run
//! starts, carries intermediate artifacts (topic, research brief,
//! sources) between stages, and is removed unconditionally when the run
//! ends, success or failure. Nothing here survives a process restart.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// A single session's keyed state
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    state: HashMap<String, Value>,
}

impl Session {
    fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            created_at: now,
            updated_at: now,
            state: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.state.get(key)
    }

    /// Set a state value, bumping the last-update timestamp.
    pub fn set(&mut self, key: &str, value: Value) {
        self.state.insert(key.to_string(), value);
        self.updated_at = Utc::now();
    }

    /// Remove a key. Returns whether it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.state.remove(key).is_some();
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Snapshot copy of the whole state map.
    pub fn get_all(&self) -> HashMap<String, Value> {
        self.state.clone()
    }

    pub fn clear(&mut self) {
        self.state.clear();
        self.updated_at = Utc::now();
    }

    /// Seconds between the last update and creation.
    pub fn duration(&self) -> f64 {
        (self.updated_at - self.created_at).num_milliseconds() as f64 / 1000.0
    }
}

/// In-memory registry of active sessions, keyed by session id
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session, or return the existing one when the id is
    /// already registered (idempotent create). A fresh uuid is generated
    /// when no id is given.
    pub fn create_session(&mut self, id: Option<&str>) -> &mut Session {
        let id = id
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        self.sessions
            .entry(id.clone())
            .or_insert_with(|| Session::new(id))
    }

    pub fn get_session(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn get_session_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    /// Remove a session from the registry. Absent ids are not an error.
    pub fn end_session(&mut self, id: &str) {
        self.sessions.remove(id);
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.keys().cloned().collect()
    }

    pub fn clear_all_sessions(&mut self) {
        self.sessions.clear();
    }
}
