use serde::{Deserialize, Serialize};

/// An interview question as stored by the data collaborator. Records are
/// validated into this shape at the load boundary so the session never
/// handles untyped data.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub text: String,
    /// 1-based presentation order, strictly increasing within an interview.
    pub order_number: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct InterviewMeta {
    pub id: String,
    pub title: String,
    pub job_title: String,
    pub job_description: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    Pending,
    Completed,
}

impl CandidateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::Pending => "pending",
            CandidateStatus::Completed => "completed",
        }
    }
}
