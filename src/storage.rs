use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::{error, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Key names shared with the access gate and the feedback view. The gate
/// writes the identity keys before a candidate session loads; the session
/// clears them on finish.
pub mod keys {
    pub const CANDIDATE_ID: &str = "candidateId";
    pub const CANDIDATE_NAME: &str = "candidateName";
    pub const INTERVIEW_ID: &str = "interviewId";
    pub const INTERVIEW_RESULTS: &str = "interviewResults";
}

/// Persisted key-value state shared with the surrounding shell. Injected
/// explicitly everywhere it is needed, never accessed ambiently.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store for tests and embedded shells.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}

/// Snapshot of a completed session, written once per completion and read by
/// the feedback view. Overwrites any previous snapshot.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InterviewResults {
    pub candidate_name: String,
    pub job_title: String,
    pub questions: Vec<String>,
    pub responses: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

impl InterviewResults {
    /// Best-effort write: a serialization failure is logged and swallowed so
    /// completion is never blocked on local persistence.
    pub fn save(&self, kv: &dyn KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => kv.set(keys::INTERVIEW_RESULTS, &json),
            Err(e) => error!("Failed to serialize interview results: {}", e),
        }
    }

    pub fn load(kv: &dyn KeyValueStore) -> Option<Self> {
        let json = kv.get(keys::INTERVIEW_RESULTS)?;
        match serde_json::from_str(&json) {
            Ok(results) => Some(results),
            Err(e) => {
                warn!("Stored interview results are unreadable: {}", e);
                None
            }
        }
    }
}
