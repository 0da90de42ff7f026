use std::sync::Arc;
use std::time::Duration;

use log::info;
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use super::engine::SessionState;

/// Timing of the simulated speech-to-text capture: one character every 30ms,
/// then a 500ms settle before the recording flag drops. Injectable so tests
/// can run the reveal on a controlled clock.
#[derive(Clone, Copy, Debug)]
pub struct RecorderConfig {
    pub char_interval: Duration,
    pub settle_delay: Duration,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            char_interval: Duration::from_millis(30),
            settle_delay: Duration::from_millis(500),
        }
    }
}

const SAMPLE_ANSWERS: &[&str] = &[
    "I have over 5 years of experience with React and have also worked extensively with Vue.js and Angular. I've built multiple production applications using these frameworks and understand the core concepts of component-based architecture, state management, and modern JavaScript features.",
    "One of the most challenging projects I worked on was a real-time collaboration tool. We faced performance issues with simultaneous edits. I implemented a custom conflict resolution algorithm based on operational transformation which solved our issues and improved performance by 40%.",
    "I subscribe to several newsletters like JavaScript Weekly and follow influential developers on Twitter. I also dedicate time each week to explore new libraries and techniques, and I attend local meetups and conferences when possible.",
    "When debugging complex issues, I first isolate the problem by creating a minimal reproduction. Then I use browser dev tools, logging, and breakpoints to trace the issue. I also use tools like React DevTools for component-specific debugging.",
    "I view feedback as an opportunity to grow. I try to separate myself from my work and consider the feedback objectively. I ask clarifying questions to fully understand the concerns, then prioritize and implement improvements based on the input.",
];

const GENERIC_ANSWER: &str = "Thank you for the question. I believe my skills and experience make me a good fit for this position.";

/// Predetermined answer for a question index, with a generic fallback beyond
/// the pool.
pub fn sample_answer(question_index: usize) -> &'static str {
    SAMPLE_ANSWERS.get(question_index).copied().unwrap_or(GENERIC_ANSWER)
}

/// Reveals the chosen answer one character per tick into the shared
/// transcript draft, then drops the recording flag after the settle delay.
/// Single-flight is enforced by the caller's precondition; the task is only
/// cancelled by session teardown.
pub(crate) fn spawn_reveal(
    state: Arc<Mutex<SessionState>>,
    question_index: usize,
    config: RecorderConfig,
) -> JoinHandle<()> {
    let answer = sample_answer(question_index);
    tokio::spawn(async move {
        for ch in answer.chars() {
            tokio::time::sleep(config.char_interval).await;
            state.lock().transcript.push(ch);
        }
        tokio::time::sleep(config.settle_delay).await;
        state.lock().is_recording = false;
        info!("🎙️ Simulated capture finished ({} chars)", answer.len());
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_answers_are_indexed_by_question() {
        assert!(sample_answer(0).contains("React"));
        assert!(sample_answer(4).contains("feedback"));
    }

    #[test]
    fn indices_beyond_pool_get_generic_answer() {
        assert_eq!(sample_answer(5), GENERIC_ANSWER);
        assert_eq!(sample_answer(100), GENERIC_ANSWER);
    }
}
