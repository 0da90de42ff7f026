use std::sync::Arc;

use chrono::Utc;
use log::info;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::{AbortHandle, JoinHandle};

use crate::database::{InterviewMeta, InterviewStore, Question, ResponseGateway};
use crate::interview::loader::{load_interview, LoadError};
use crate::interview::recorder::{spawn_reveal, RecorderConfig};
use crate::session::{ParticipantKind, SessionStore};
use crate::storage::{InterviewResults, KeyValueStore};

/// Rejected precondition on a session transition. No state changes; the
/// caller re-prompts and tries again.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please enter your name to begin the interview")]
    NameRequired,
    #[error("Name has already been submitted")]
    NameAlreadySubmitted,
    #[error("Interview session is not active")]
    NotActive,
    #[error("Recording is in progress")]
    RecordingInProgress,
    #[error("No answer to submit")]
    EmptyTranscript,
    #[error("Interview is not completed yet")]
    NotCompleted,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    AwaitingName,
    Active,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Advanced { next_index: usize },
    Completed,
}

/// Where the shell should send the participant after `finish`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationTarget {
    Landing,
    Feedback { interview_id: String },
}

/// Mutable per-session state, guarded by one mutex so every transition is
/// atomic: it fully succeeds or is rejected by precondition.
pub(crate) struct SessionState {
    pub(crate) phase: SessionPhase,
    pub(crate) participant_id: Option<String>,
    pub(crate) participant_name: String,
    pub(crate) responses: Vec<String>,
    pub(crate) current_index: usize,
    pub(crate) transcript: String,
    pub(crate) is_recording: bool,
}

/// One participant's pass through an interview, from identification to
/// completion. Owns the question list, the response slots and the simulated
/// capture; persistence runs detached and never blocks a transition.
pub struct InterviewEngine {
    interview_id: String,
    kind: ParticipantKind,
    meta: InterviewMeta,
    questions: Vec<Question>,
    state: Arc<Mutex<SessionState>>,
    gateway: ResponseGateway,
    session_store: SessionStore,
    kv: Arc<dyn KeyValueStore>,
    recorder: RecorderConfig,
    reveal_task: Mutex<Option<AbortHandle>>,
}

impl InterviewEngine {
    /// Loads the interview and builds a session. A gated candidate whose
    /// stored interview id matches skips name entry; everyone else starts at
    /// the name form. Load failures are fatal: the caller redirects away and
    /// no session exists.
    pub async fn join(
        interview_id: impl Into<String>,
        kind: ParticipantKind,
        store: Arc<dyn InterviewStore>,
        kv: Arc<dyn KeyValueStore>,
    ) -> Result<Self, LoadError> {
        Self::join_with_config(interview_id, kind, store, kv, RecorderConfig::default()).await
    }

    pub async fn join_with_config(
        interview_id: impl Into<String>,
        kind: ParticipantKind,
        store: Arc<dyn InterviewStore>,
        kv: Arc<dyn KeyValueStore>,
        recorder: RecorderConfig,
    ) -> Result<Self, LoadError> {
        let interview_id = interview_id.into();
        info!("🎬 Joining interview session: {}", interview_id);

        let loaded = load_interview(store.as_ref(), &interview_id).await?;

        let session_store = SessionStore::new(kv.clone());
        let identity = match kind {
            ParticipantKind::Candidate => session_store.resolve(&interview_id),
            ParticipantKind::CompanyPreviewer => None,
        };

        let (phase, participant_id, participant_name) = match identity {
            Some(identity) => {
                info!("✅ Candidate {} already identified, skipping name entry", identity.candidate_id);
                (SessionPhase::Active, Some(identity.candidate_id), identity.candidate_name)
            }
            None => (SessionPhase::AwaitingName, None, String::new()),
        };

        let responses = vec![String::new(); loaded.questions.len()];

        Ok(Self {
            interview_id,
            kind,
            meta: loaded.meta,
            questions: loaded.questions,
            state: Arc::new(Mutex::new(SessionState {
                phase,
                participant_id,
                participant_name,
                responses,
                current_index: 0,
                transcript: String::new(),
                is_recording: false,
            })),
            gateway: ResponseGateway::new(store),
            session_store,
            kv,
            recorder,
            reveal_task: Mutex::new(None),
        })
    }

    /// Passes the name-entry step. Valid only while awaiting a name, with a
    /// non-empty trimmed name.
    pub fn submit_name(&self, name: &str) -> Result<(), SessionError> {
        let trimmed = name.trim();
        let mut state = self.state.lock();

        if state.phase != SessionPhase::AwaitingName {
            return Err(SessionError::NameAlreadySubmitted);
        }
        if trimmed.is_empty() {
            return Err(SessionError::NameRequired);
        }

        state.participant_name = trimmed.to_string();
        state.phase = SessionPhase::Active;
        info!("👋 {} started the interview '{}'", trimmed, self.meta.title);
        Ok(())
    }

    /// Starts the simulated capture for the current question. Single-flight:
    /// starting while a reveal is running is rejected. Returns the reveal
    /// task handle; the shell may ignore it, tests await it.
    pub fn start_recording(&self) -> Result<JoinHandle<()>, SessionError> {
        let question_index = {
            let mut state = self.state.lock();
            if state.phase != SessionPhase::Active {
                return Err(SessionError::NotActive);
            }
            if state.is_recording {
                return Err(SessionError::RecordingInProgress);
            }
            state.is_recording = true;
            state.transcript.clear();
            state.current_index
        };

        info!("🎤 Recording answer for question {}", question_index + 1);
        let handle = spawn_reveal(self.state.clone(), question_index, self.recorder);
        *self.reveal_task.lock() = Some(handle.abort_handle());
        Ok(handle)
    }

    /// Finalizes the current answer and advances. Valid only while active,
    /// not recording, with a non-empty transcript. Persistence of the answer
    /// (and, on the last question, of the completion status and the result
    /// snapshot) runs detached: a failed backend write never blocks, reverts
    /// or surfaces.
    pub async fn submit_answer(&self) -> Result<SubmitOutcome, SessionError> {
        let mut state = self.state.lock();

        if state.phase != SessionPhase::Active {
            return Err(SessionError::NotActive);
        }
        if state.is_recording {
            return Err(SessionError::RecordingInProgress);
        }
        if state.transcript.trim().is_empty() {
            return Err(SessionError::EmptyTranscript);
        }

        let index = state.current_index;
        let answer = state.transcript.clone();
        state.responses[index] = answer.clone();

        let gateway = self.gateway.clone();
        let participant_id = state.participant_id.clone();
        let question_id = self.questions[index].id.clone();
        tokio::spawn(async move {
            gateway.record_answer(participant_id.as_deref(), &question_id, &answer).await;
        });

        if index == self.questions.len() - 1 {
            state.phase = SessionPhase::Completed;

            let gateway = self.gateway.clone();
            let participant_id = state.participant_id.clone();
            tokio::spawn(async move {
                gateway.mark_completed(participant_id.as_deref()).await;
            });

            self.write_snapshot(&state);
            info!("🏆 Interview '{}' completed after {} questions", self.meta.title, self.questions.len());
            Ok(SubmitOutcome::Completed)
        } else {
            state.current_index += 1;
            state.transcript.clear();
            info!("➡️ Advancing to question {}/{}", state.current_index + 1, self.questions.len());
            Ok(SubmitOutcome::Advanced { next_index: state.current_index })
        }
    }

    /// Closes a completed session. Candidates get their stored identity
    /// cleared and go back to the landing target; company previewers go to
    /// the feedback view for this interview.
    pub fn finish(&self) -> Result<NavigationTarget, SessionError> {
        {
            let state = self.state.lock();
            if state.phase != SessionPhase::Completed {
                return Err(SessionError::NotCompleted);
            }
        }

        match self.kind {
            ParticipantKind::Candidate => {
                self.session_store.clear();
                info!("🚪 Candidate session closed for interview {}", self.interview_id);
                Ok(NavigationTarget::Landing)
            }
            ParticipantKind::CompanyPreviewer => Ok(NavigationTarget::Feedback {
                interview_id: self.interview_id.clone(),
            }),
        }
    }

    fn write_snapshot(&self, state: &SessionState) {
        let results = InterviewResults {
            candidate_name: state.participant_name.clone(),
            job_title: self.meta.job_title.clone(),
            questions: self.questions.iter().map(|q| q.text.clone()).collect(),
            responses: state.responses.clone(),
            completed_at: Utc::now(),
        };
        results.save(self.kv.as_ref());
    }

    // Read accessors for the UI shell.

    pub fn interview_id(&self) -> &str {
        &self.interview_id
    }

    pub fn participant_kind(&self) -> ParticipantKind {
        self.kind
    }

    pub fn meta(&self) -> &InterviewMeta {
        &self.meta
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.lock().phase
    }

    pub fn current_index(&self) -> usize {
        self.state.lock().current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.state.lock().current_index]
    }

    pub fn is_last_question(&self) -> bool {
        self.state.lock().current_index == self.questions.len() - 1
    }

    pub fn transcript(&self) -> String {
        self.state.lock().transcript.clone()
    }

    pub fn is_recording(&self) -> bool {
        self.state.lock().is_recording
    }

    pub fn is_completed(&self) -> bool {
        self.state.lock().phase == SessionPhase::Completed
    }

    pub fn responses(&self) -> Vec<String> {
        self.state.lock().responses.clone()
    }

    pub fn participant_name(&self) -> String {
        self.state.lock().participant_name.clone()
    }

    pub fn participant_id(&self) -> Option<String> {
        self.state.lock().participant_id.clone()
    }
}

impl Drop for InterviewEngine {
    fn drop(&mut self) {
        // Session teardown is the only cancellation path for the reveal task.
        if let Some(task) = self.reveal_task.lock().take() {
            task.abort();
        }
    }
}
