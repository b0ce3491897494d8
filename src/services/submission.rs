//! Lifecycle of one journal submission, from mood selection to feedback.
//!
//! `Idle → Composing → Submitting → Succeeded | Failed`. Both terminal states
//! can restart at `Composing` through [`Submission::retry`]. Every submit hands
//! out a [`SubmissionTicket`]; once the user navigates away ([`Submission::abandon`])
//! or starts over, older tickets no longer resolve anything, so a late reply is
//! dropped instead of landing on a screen that is gone.

use crate::error::{AnalysisError, AppError};
use crate::models::journal::JournalEntry;
use crate::services::llm_client::CompletionClient;
use crate::services::prompts::questions_for;
use crate::services::reply_parser::{parse_reply, AnalysisReply};
use crate::services::request_builder::{build_request, GenerationParams, ModelRequest};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("No question at index {0}")]
    NoSuchQuestion(usize),

    #[error("Invalid journal entry: {0}")]
    InvalidEntry(String),
}

impl From<SubmissionError> for AppError {
    fn from(e: SubmissionError) -> Self {
        match e {
            SubmissionError::InvalidTransition { .. } => AppError::Internal(e.into()),
            other => AppError::Validation(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket(u64);

#[derive(Debug, Clone)]
pub struct Draft {
    pub mood_label: String,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum SubmissionState {
    Idle,
    Composing(Draft),
    Submitting {
        draft: Draft,
        ticket: SubmissionTicket,
    },
    Succeeded {
        draft: Draft,
        reply: AnalysisReply,
    },
    Failed {
        draft: Draft,
        error: AnalysisError,
    },
}

impl SubmissionState {
    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Composing(_) => "composing",
            SubmissionState::Submitting { .. } => "submitting",
            SubmissionState::Succeeded { .. } => "succeeded",
            SubmissionState::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug)]
pub struct Submission {
    state: SubmissionState,
    next_ticket: u64,
}

impl Default for Submission {
    fn default() -> Self {
        Self::new()
    }
}

impl Submission {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
            next_ticket: 0,
        }
    }

    /// Picks a mood and derives its questions. Allowed from any state except
    /// while a request is in flight.
    pub fn select_mood(&mut self, mood_label: &str) -> Result<Vec<String>, SubmissionError> {
        if let SubmissionState::Submitting { .. } = self.state {
            return Err(self.invalid("select a mood"));
        }

        let questions: Vec<String> = questions_for(Some(mood_label))
            .iter()
            .map(|q| q.to_string())
            .collect();

        self.state = SubmissionState::Composing(Draft {
            mood_label: mood_label.trim().to_string(),
            questions: questions.clone(),
            answers: vec![String::new(); questions.len()],
        });
        Ok(questions)
    }

    /// Replaces every answer at once; `answers` must cover each question.
    pub fn fill<A: AsRef<str>>(&mut self, answers: &[A]) -> Result<(), SubmissionError> {
        let invalid = self.invalid("answer");
        let SubmissionState::Composing(draft) = &mut self.state else {
            return Err(invalid);
        };
        if answers.len() != draft.questions.len() {
            return Err(SubmissionError::InvalidEntry(format!(
                "Expected {} answers, got {}",
                draft.questions.len(),
                answers.len()
            )));
        }
        draft.answers = answers.iter().map(|a| a.as_ref().to_string()).collect();
        Ok(())
    }

    /// Freezes the answers into a request and moves to `Submitting`.
    pub fn submit(
        &mut self,
        params: &GenerationParams,
    ) -> Result<(SubmissionTicket, ModelRequest), SubmissionError> {
        let SubmissionState::Composing(draft) = &self.state else {
            return Err(self.invalid("submit"));
        };

        let entry = JournalEntry::new(&draft.mood_label, &draft.questions, &draft.answers)
            .map_err(|e| SubmissionError::InvalidEntry(e.to_string()))?;
        let request = build_request(&entry, params);
        tracing::debug!(
            mood = %entry.mood_label,
            catalog = entry.mood().is_some(),
            answered = entry.answers.iter().filter(|a| !a.answer.is_empty()).count(),
            "Submitting journal entry"
        );

        self.next_ticket += 1;
        let ticket = SubmissionTicket(self.next_ticket);
        self.state = SubmissionState::Submitting {
            draft: draft.clone(),
            ticket,
        };
        Ok((ticket, request))
    }

    /// Applies the outcome of the attempt identified by `ticket`.
    ///
    /// Returns `false` when the ticket is stale and the outcome was discarded.
    pub fn resolve(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<AnalysisReply, AnalysisError>,
    ) -> bool {
        let draft = match &self.state {
            SubmissionState::Submitting { draft, ticket: current } if *current == ticket => {
                draft.clone()
            }
            _ => {
                tracing::debug!(?ticket, state = self.state.name(), "Discarding stale reply");
                return false;
            }
        };

        self.state = match outcome {
            Ok(reply) => SubmissionState::Succeeded { draft, reply },
            Err(error) => SubmissionState::Failed { draft, error },
        };
        true
    }

    pub fn into_state(self) -> SubmissionState {
        self.state
    }

    fn invalid(&self, action: &'static str) -> SubmissionError {
        SubmissionError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}

/// Step-by-step controls for an interactive client holding one `Submission`
/// across screens. The HTTP handler fills every answer at once and finishes
/// within one request, so it drives none of these.
#[allow(dead_code)]
impl Submission {
    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn answer(&mut self, index: usize, text: &str) -> Result<(), SubmissionError> {
        let invalid = self.invalid("answer");
        let SubmissionState::Composing(draft) = &mut self.state else {
            return Err(invalid);
        };
        let slot = draft
            .answers
            .get_mut(index)
            .ok_or(SubmissionError::NoSuchQuestion(index))?;
        *slot = text.to_string();
        Ok(())
    }

    /// The user left the journal screen; any reply still in flight is dropped.
    pub fn abandon(&mut self) {
        self.state = SubmissionState::Idle;
    }

    /// Starts a new attempt with the previous mood and answers.
    pub fn retry(&mut self) -> Result<(), SubmissionError> {
        let draft = match &self.state {
            SubmissionState::Succeeded { draft, .. } | SubmissionState::Failed { draft, .. } => {
                draft.clone()
            }
            _ => return Err(self.invalid("retry")),
        };
        self.state = SubmissionState::Composing(draft);
        Ok(())
    }
}

/// Sends a frozen request and reads the reply: send → await → parse.
pub async fn send(
    client: &CompletionClient,
    request: &ModelRequest,
) -> Result<AnalysisReply, AnalysisError> {
    let content = client.complete(request).await?;
    parse_reply(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_recording_stub;
    use std::time::Duration;

    fn reply() -> AnalysisReply {
        AnalysisReply {
            narrative: "ok".into(),
            suggestions: vec!["a".into(), "b".into()],
        }
    }

    fn composed(mood: &str) -> Submission {
        let mut submission = Submission::new();
        submission.select_mood(mood).unwrap();
        for i in 0..3 {
            submission.answer(i, &format!("A{}", i + 1)).unwrap();
        }
        submission
    }

    #[test]
    fn test_select_mood_derives_questions() {
        let mut submission = Submission::new();
        let questions = submission.select_mood("Sad").unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0], "What triggered this feeling?");
        assert_eq!(submission.state().name(), "composing");
    }

    #[test]
    fn test_happy_path_reaches_succeeded() {
        let mut submission = composed("Sad");
        let (ticket, request) = submission.submit(&GenerationParams::default()).unwrap();
        assert_eq!(submission.state().name(), "submitting");
        assert!(request.messages[1].content.starts_with("Q: What triggered this feeling?\nA: A1"));

        assert!(submission.resolve(ticket, Ok(reply())));
        match submission.state() {
            SubmissionState::Succeeded { reply, .. } => assert_eq!(reply.narrative, "ok"),
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_failure_is_terminal_until_retry() {
        let mut submission = composed("Angry");
        let (ticket, _) = submission.submit(&GenerationParams::default()).unwrap();
        assert!(submission.resolve(ticket, Err(AnalysisError::Parse("bad".into()))));
        assert_eq!(submission.state().name(), "failed");

        assert!(matches!(
            submission.submit(&GenerationParams::default()),
            Err(SubmissionError::InvalidTransition { action: "submit", state: "failed" })
        ));

        submission.retry().unwrap();
        match submission.state() {
            SubmissionState::Composing(draft) => assert_eq!(draft.answers[0], "A1"),
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_abandoned_submission_discards_late_reply() {
        let mut submission = composed("Calm");
        let (ticket, _) = submission.submit(&GenerationParams::default()).unwrap();
        submission.abandon();

        assert!(!submission.resolve(ticket, Ok(reply())));
        assert_eq!(submission.state().name(), "idle");
    }

    #[test]
    fn test_ticket_from_previous_attempt_is_stale() {
        let mut submission = composed("Confused");
        let (first, _) = submission.submit(&GenerationParams::default()).unwrap();
        submission.abandon();

        submission.select_mood("Confused").unwrap();
        submission.answer(0, "again").unwrap();
        let (second, _) = submission.submit(&GenerationParams::default()).unwrap();
        assert_ne!(first, second);

        assert!(!submission.resolve(first, Ok(reply())));
        assert_eq!(submission.state().name(), "submitting");
        assert!(submission.resolve(second, Ok(reply())));
    }

    #[test]
    fn test_cannot_answer_while_submitting() {
        let mut submission = composed("Happy");
        submission.submit(&GenerationParams::default()).unwrap();
        assert!(matches!(
            submission.answer(0, "late edit"),
            Err(SubmissionError::InvalidTransition { .. })
        ));
        assert!(submission.select_mood("Sad").is_err());
    }

    #[test]
    fn test_answer_index_out_of_range() {
        let mut submission = Submission::new();
        submission.select_mood("Happy").unwrap();
        assert_eq!(submission.answer(3, "x"), Err(SubmissionError::NoSuchQuestion(3)));
    }

    #[test]
    fn test_submit_with_blank_answers_stays_composing() {
        let mut submission = Submission::new();
        submission.select_mood("Stressed").unwrap();
        assert!(matches!(
            submission.submit(&GenerationParams::default()),
            Err(SubmissionError::InvalidEntry(_))
        ));
        assert_eq!(submission.state().name(), "composing");
    }

    #[test]
    fn test_idle_cannot_submit_or_retry() {
        let mut submission = Submission::new();
        assert!(submission.submit(&GenerationParams::default()).is_err());
        assert!(submission.retry().is_err());
    }

    #[test]
    fn test_fill_requires_every_answer() {
        let mut submission = Submission::new();
        submission.select_mood("Happy").unwrap();
        assert!(matches!(
            submission.fill(&["one", "two"]),
            Err(SubmissionError::InvalidEntry(_))
        ));
        submission.fill(&["one", "two", "three"]).unwrap();
        match submission.state() {
            SubmissionState::Composing(draft) => assert_eq!(draft.answers[2], "three"),
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_full_lifecycle_against_stub_service() {
        let (base, seen) =
            spawn_recording_stub(r#"{"text":"ok","personalized_exercises":["a","b"]}"#).await;
        let client = CompletionClient::new(&base, "sk-test", Duration::from_secs(5)).unwrap();

        let mut submission = composed("Sad");
        let (ticket, request) = submission.submit(&GenerationParams::default()).unwrap();
        let outcome = send(&client, &request).await;
        assert!(submission.resolve(ticket, outcome));

        match submission.into_state() {
            SubmissionState::Succeeded { reply, .. } => assert_eq!(reply, self::reply()),
            other => panic!("unexpected state {:?}", other),
        }

        let seen = seen.lock().await;
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].path, "/chat/completions");
        assert_eq!(seen[0].authorization.as_deref(), Some("Bearer sk-test"));
        assert_eq!(seen[0].body["model"], "gpt-3.5-turbo");
        assert_eq!(
            seen[0].body["messages"][1]["content"],
            "Q: What triggered this feeling?\nA: A1\n\nQ: Have you felt this way before?\nA: A2\n\nQ: What usually helps you feel better?\nA: A3"
        );
    }
}
