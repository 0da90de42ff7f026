pub mod gateway;
pub mod models;
pub mod store;

pub use gateway::ResponseGateway;
pub use models::{CandidateStatus, InterviewMeta, Question};
pub use store::InterviewStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Interview not found: {0}")]
    NotFound(String),
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
