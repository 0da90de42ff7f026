//! HireFlow interview session core.
//!
//! Companies author interviews, candidates join through an access gate and
//! answer questions via a simulated voice-to-text capture; the session state
//! machine sequences the questions and persists responses best-effort. The
//! crate owns no UI or wire format: shells inject the data collaborator
//! ([`InterviewStore`]) and the shared key-value state ([`KeyValueStore`])
//! and drive [`InterviewEngine`].

pub mod database;
pub mod interview;
pub mod session;
pub mod storage;

pub use database::{
    CandidateStatus, InterviewMeta, InterviewStore, Question, ResponseGateway, StoreError,
};
pub use interview::{
    build_question_set, extract_questions, fallback_questions, generate_question_set,
    load_interview, sample_answer, GenerationError, InterviewEngine, LoadError, LoadedInterview,
    NavigationTarget, QuestionGenerator, RecorderConfig, SessionError, SessionPhase,
    SubmitOutcome,
};
pub use session::{ParticipantKind, SessionStore, StoredIdentity};
pub use storage::{keys, InterviewResults, KeyValueStore, MemoryStore};
