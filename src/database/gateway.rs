use std::sync::Arc;

use log::{error, info};

use super::{CandidateStatus, InterviewStore};

/// Best-effort write path for the session. Every call is individually
/// fallible and never reports failure to the caller: local session state is
/// the source of truth for the live flow, the backend write is a bonus.
#[derive(Clone)]
pub struct ResponseGateway {
    store: Arc<dyn InterviewStore>,
}

impl ResponseGateway {
    pub fn new(store: Arc<dyn InterviewStore>) -> Self {
        Self { store }
    }

    /// Appends one response record. Anonymous participants (no candidate id)
    /// are a silent no-op: previews and unidentified candidates still flow
    /// through the full interview without persisting anything.
    pub async fn record_answer(&self, candidate_id: Option<&str>, question_id: &str, text: &str) {
        let candidate_id = match candidate_id {
            Some(id) => id,
            None => return,
        };

        match self.store.insert_response(candidate_id, question_id, text).await {
            Ok(()) => info!("💾 Response saved for question {}", question_id),
            Err(e) => error!("Error saving response for question {}: {}", question_id, e),
        }
    }

    /// Marks the candidate as done with the interview. Same policy as
    /// [`record_answer`](Self::record_answer): no id, no write; errors are
    /// logged and swallowed.
    pub async fn mark_completed(&self, candidate_id: Option<&str>) {
        let candidate_id = match candidate_id {
            Some(id) => id,
            None => return,
        };

        match self
            .store
            .update_candidate_status(candidate_id, CandidateStatus::Completed)
            .await
        {
            Ok(()) => info!("🏁 Candidate {} marked as completed", candidate_id),
            Err(e) => error!("Error updating candidate status: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{InterviewMeta, Question, Result, StoreError};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        responses: Mutex<Vec<(String, String, String)>>,
        status_updates: Mutex<Vec<(String, CandidateStatus)>>,
        fail_writes: bool,
    }

    #[async_trait]
    impl InterviewStore for RecordingStore {
        async fn fetch_interview_meta(&self, interview_id: &str) -> Result<InterviewMeta> {
            Err(StoreError::NotFound(interview_id.to_string()))
        }

        async fn fetch_questions(&self, _interview_id: &str) -> Result<Vec<Question>> {
            Ok(vec![])
        }

        async fn insert_response(
            &self,
            candidate_id: &str,
            question_id: &str,
            response: &str,
        ) -> Result<()> {
            if self.fail_writes {
                return Err(StoreError::Unavailable("connection reset".to_string()));
            }
            self.responses.lock().push((
                candidate_id.to_string(),
                question_id.to_string(),
                response.to_string(),
            ));
            Ok(())
        }

        async fn update_candidate_status(
            &self,
            candidate_id: &str,
            status: CandidateStatus,
        ) -> Result<()> {
            if self.fail_writes {
                return Err(StoreError::Unavailable("connection reset".to_string()));
            }
            self.status_updates
                .lock()
                .push((candidate_id.to_string(), status));
            Ok(())
        }
    }

    #[tokio::test]
    async fn records_answer_for_identified_candidate() {
        let store = Arc::new(RecordingStore::default());
        let gateway = ResponseGateway::new(store.clone());

        gateway.record_answer(Some("c-1"), "q-1", "my answer").await;

        let responses = store.responses.lock();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].0, "c-1");
        assert_eq!(responses[0].1, "q-1");
    }

    #[tokio::test]
    async fn skips_writes_without_candidate_id() {
        let store = Arc::new(RecordingStore::default());
        let gateway = ResponseGateway::new(store.clone());

        gateway.record_answer(None, "q-1", "my answer").await;
        gateway.mark_completed(None).await;

        assert!(store.responses.lock().is_empty());
        assert!(store.status_updates.lock().is_empty());
    }

    #[tokio::test]
    async fn swallows_backend_failures() {
        let store = Arc::new(RecordingStore {
            fail_writes: true,
            ..Default::default()
        });
        let gateway = ResponseGateway::new(store.clone());

        // Neither call panics or propagates the error.
        gateway.record_answer(Some("c-1"), "q-1", "my answer").await;
        gateway.mark_completed(Some("c-1")).await;
    }

    #[tokio::test]
    async fn marks_candidate_completed() {
        let store = Arc::new(RecordingStore::default());
        let gateway = ResponseGateway::new(store.clone());

        gateway.mark_completed(Some("c-7")).await;

        let updates = store.status_updates.lock();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0], ("c-7".to_string(), CandidateStatus::Completed));
    }
}
