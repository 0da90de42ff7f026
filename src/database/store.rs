use async_trait::async_trait;

use super::{CandidateStatus, InterviewMeta, Question, Result};

/// The external data collaborator. The session core owns no wire format;
/// shells plug in whatever backend holds interviews, questions and candidate
/// responses.
#[async_trait]
pub trait InterviewStore: Send + Sync {
    async fn fetch_interview_meta(&self, interview_id: &str) -> Result<InterviewMeta>;

    async fn fetch_questions(&self, interview_id: &str) -> Result<Vec<Question>>;

    async fn insert_response(
        &self,
        candidate_id: &str,
        question_id: &str,
        response: &str,
    ) -> Result<()>;

    async fn update_candidate_status(
        &self,
        candidate_id: &str,
        status: CandidateStatus,
    ) -> Result<()>;
}
