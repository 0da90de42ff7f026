use async_trait::async_trait;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use uuid::Uuid;

use crate::database::Question;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Question generation failed: {0}")]
    Failed(String),
}

/// Black-box text-generation collaborator used while authoring an interview.
/// Never consumed during a live session.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(
        &self,
        job_title: &str,
        job_description: &str,
        count: usize,
    ) -> Result<Vec<String>, GenerationError>;
}

static QUESTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?]*\?").expect("question pattern compiles"));

/// Recovers question-shaped sentences from raw model output when the
/// structured parse fails: anything ending in a question mark, longer than
/// ten characters, capped at five.
pub fn extract_questions(text: &str) -> Vec<String> {
    QUESTION_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|q| q.len() > 10)
        .take(5)
        .collect()
}

/// Combines custom and generated questions into an ordered set: blank custom
/// entries are dropped, custom questions come first, order numbers are
/// 1-based and strictly increasing.
pub fn build_question_set(custom: &[String], generated: &[String]) -> Vec<Question> {
    custom
        .iter()
        .filter(|q| !q.trim().is_empty())
        .chain(generated.iter())
        .enumerate()
        .map(|(i, text)| Question {
            id: Uuid::new_v4().to_string(),
            text: text.trim().to_string(),
            order_number: (i + 1) as u32,
        })
        .collect()
}

/// Authoring entry point: asks the collaborator for generated questions and
/// merges them behind any custom ones.
pub async fn generate_question_set(
    generator: &dyn QuestionGenerator,
    job_title: &str,
    job_description: &str,
    count: usize,
    custom: &[String],
) -> Result<Vec<Question>, GenerationError> {
    let generated = generator.generate(job_title, job_description, count).await?;
    info!("🤖 Generated {} interview questions for {} position", generated.len(), job_title);
    Ok(build_question_set(custom, &generated))
}
