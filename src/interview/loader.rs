use log::{info, warn};
use once_cell::sync::Lazy;
use thiserror::Error;

use crate::database::{InterviewMeta, InterviewStore, Question, StoreError};

/// Fatal session-start failure. The caller must redirect away; no partial
/// session exists after one of these.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to load interview details: {0}")]
    Interview(StoreError),
    #[error("Failed to load interview questions: {0}")]
    Questions(StoreError),
}

#[derive(Clone, Debug)]
pub struct LoadedInterview {
    pub meta: InterviewMeta,
    pub questions: Vec<Question>,
}

static FALLBACK_QUESTIONS: Lazy<Vec<Question>> = Lazy::new(|| {
    [
        "What experience do you have with React and other modern JavaScript frameworks?",
        "Can you describe a challenging project you worked on and how you overcame obstacles?",
        "How do you stay updated with the latest industry trends and technologies?",
        "Describe your approach to debugging a complex issue in a large codebase.",
        "How do you handle feedback and criticism of your work?",
    ]
    .iter()
    .enumerate()
    .map(|(i, text)| Question {
        id: format!("q{}", i + 1),
        text: text.to_string(),
        order_number: (i + 1) as u32,
    })
    .collect()
});

/// Demo questions used when an interview has no questions configured, so a
/// session is never blocked on empty content.
pub fn fallback_questions() -> Vec<Question> {
    FALLBACK_QUESTIONS.clone()
}

/// One-shot load of interview metadata and the ordered question list. Runs
/// exactly once per session, before any question is shown; never re-fetched
/// mid-session.
pub async fn load_interview(
    store: &dyn InterviewStore,
    interview_id: &str,
) -> Result<LoadedInterview, LoadError> {
    let meta = store
        .fetch_interview_meta(interview_id)
        .await
        .map_err(LoadError::Interview)?;

    let mut questions = store
        .fetch_questions(interview_id)
        .await
        .map_err(LoadError::Questions)?;

    if questions.is_empty() {
        warn!("⚠️ No questions configured for interview {}, using fallback set", interview_id);
        questions = fallback_questions();
    } else {
        // Stable sort: insertion order breaks ties, though the authoring path
        // never produces equal order numbers.
        questions.sort_by_key(|q| q.order_number);
    }

    info!("✅ Loaded interview '{}' with {} questions", meta.title, questions.len());

    Ok(LoadedInterview { meta, questions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{CandidateStatus, Result, StoreError};
    use async_trait::async_trait;

    struct FakeStore {
        meta: Result<InterviewMeta>,
        questions: Result<Vec<Question>>,
    }

    fn meta() -> InterviewMeta {
        InterviewMeta {
            id: "int-1".to_string(),
            title: "Frontend Screen".to_string(),
            job_title: "Frontend Developer".to_string(),
            job_description: "Build delightful UIs".to_string(),
        }
    }

    fn question(id: &str, order_number: u32) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {}", id),
            order_number,
        }
    }

    #[async_trait]
    impl InterviewStore for FakeStore {
        async fn fetch_interview_meta(&self, _interview_id: &str) -> Result<InterviewMeta> {
            self.meta.as_ref().cloned().map_err(|e| clone_error(e))
        }

        async fn fetch_questions(&self, _interview_id: &str) -> Result<Vec<Question>> {
            self.questions.as_ref().cloned().map_err(|e| clone_error(e))
        }

        async fn insert_response(&self, _: &str, _: &str, _: &str) -> Result<()> {
            Ok(())
        }

        async fn update_candidate_status(&self, _: &str, _: CandidateStatus) -> Result<()> {
            Ok(())
        }
    }

    fn clone_error(e: &StoreError) -> StoreError {
        match e {
            StoreError::NotFound(s) => StoreError::NotFound(s.clone()),
            StoreError::Unavailable(s) => StoreError::Unavailable(s.clone()),
            StoreError::QueryFailed(s) => StoreError::QueryFailed(s.clone()),
        }
    }

    #[tokio::test]
    async fn sorts_questions_by_order_number() {
        let store = FakeStore {
            meta: Ok(meta()),
            questions: Ok(vec![question("b", 2), question("c", 3), question("a", 1)]),
        };

        let loaded = load_interview(&store, "int-1").await.unwrap();
        let ids: Vec<&str> = loaded.questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn empty_question_set_falls_back_to_demo_questions() {
        let store = FakeStore {
            meta: Ok(meta()),
            questions: Ok(vec![]),
        };

        let loaded = load_interview(&store, "int-1").await.unwrap();
        assert_eq!(loaded.questions.len(), 5);
        assert_eq!(loaded.questions[0].order_number, 1);
        assert_eq!(loaded.questions[4].order_number, 5);
        assert!(loaded.questions.iter().all(|q| !q.text.is_empty()));
    }

    #[tokio::test]
    async fn missing_interview_is_fatal() {
        let store = FakeStore {
            meta: Err(StoreError::NotFound("int-1".to_string())),
            questions: Ok(vec![question("a", 1)]),
        };

        let err = load_interview(&store, "int-1").await.unwrap_err();
        assert!(matches!(err, LoadError::Interview(_)));
    }

    #[tokio::test]
    async fn question_fetch_failure_is_fatal() {
        let store = FakeStore {
            meta: Ok(meta()),
            questions: Err(StoreError::Unavailable("timeout".to_string())),
        };

        let err = load_interview(&store, "int-1").await.unwrap_err();
        assert!(matches!(err, LoadError::Questions(_)));
    }
}
