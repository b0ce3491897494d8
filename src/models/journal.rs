use serde::Serialize;

use crate::error::AppError;
use crate::models::mood::Mood;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JournalAnswer {
    pub question: String,
    pub answer: String,
}

/// One in-progress journal entry: a mood label and one answer per derived question.
#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    pub mood_label: String,
    pub answers: Vec<JournalAnswer>,
}

impl JournalEntry {
    /// Pairs `answers` with `questions`, which must have the same length.
    pub fn new<Q, A>(mood_label: &str, questions: &[Q], answers: &[A]) -> Result<Self, AppError>
    where
        Q: AsRef<str>,
        A: AsRef<str>,
    {
        if questions.len() != answers.len() {
            return Err(AppError::Validation(format!(
                "Expected {} answers, got {}",
                questions.len(),
                answers.len()
            )));
        }

        let answers: Vec<JournalAnswer> = questions
            .iter()
            .zip(answers)
            .map(|(q, a)| JournalAnswer {
                question: q.as_ref().to_string(),
                answer: a.as_ref().trim().to_string(),
            })
            .collect();

        if answers.iter().all(|a| a.answer.is_empty()) {
            return Err(AppError::Validation(
                "Answer at least one question before saving".into(),
            ));
        }

        Ok(Self {
            mood_label: mood_label.trim().to_string(),
            answers,
        })
    }

    /// Builds an entry against the questions derived for `mood_label`.
    #[cfg(test)]
    pub fn for_mood<A: AsRef<str>>(mood_label: &str, answers: &[A]) -> Result<Self, AppError> {
        let questions = crate::services::prompts::questions_for(Some(mood_label));
        Self::new(mood_label, &questions, answers)
    }

    pub fn mood(&self) -> Option<Mood> {
        Mood::from_label(&self.mood_label)
    }
}
