use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::storage::{keys, KeyValueStore};

/// Who is taking the interview. Drives post-completion routing and whether
/// responses persist to the backend.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticipantKind {
    Candidate,
    CompanyPreviewer,
}

/// Identity left behind by the access gate before the session loads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredIdentity {
    pub candidate_id: String,
    pub candidate_name: String,
}

/// Reads and clears the shared identity keys at well-defined session
/// boundaries. No retry logic: a missing or mismatched identity simply falls
/// back to manual name entry.
#[derive(Clone)]
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Resolves a previously gated candidate. Some only when all three
    /// identity keys are present and the stored interview id matches the
    /// interview being opened.
    pub fn resolve(&self, interview_id: &str) -> Option<StoredIdentity> {
        let candidate_id = self.kv.get(keys::CANDIDATE_ID)?;
        let candidate_name = self.kv.get(keys::CANDIDATE_NAME)?;
        let stored_interview_id = self.kv.get(keys::INTERVIEW_ID)?;

        if stored_interview_id != interview_id {
            return None;
        }

        Some(StoredIdentity {
            candidate_id,
            candidate_name,
        })
    }

    /// The access gate's write point. Kept here so the gate and the tests
    /// share one code path for the key layout.
    pub fn remember(&self, interview_id: &str, candidate_id: &str, candidate_name: &str) {
        self.kv.set(keys::CANDIDATE_ID, candidate_id);
        self.kv.set(keys::CANDIDATE_NAME, candidate_name);
        self.kv.set(keys::INTERVIEW_ID, interview_id);
    }

    /// Clears the identity keys so a fresh access-gate pass is required for
    /// any future interview.
    pub fn clear(&self) {
        self.kv.remove(keys::CANDIDATE_ID);
        self.kv.remove(keys::CANDIDATE_NAME);
        self.kv.remove(keys::INTERVIEW_ID);
        info!("🧹 Cleared stored candidate identity");
    }
}
