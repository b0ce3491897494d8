use serde::Serialize;

use crate::models::journal::JournalEntry;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

const COUNSELOR_PERSONA: &str = r#"You are an empathetic, understanding and emotionally intelligent virtual counselor and emotional support companion. Offer a safe, non-judgmental space. Respond with warmth, validate the person's feelings and help them feel heard.

Do not offer quick fixes. Suggest simple, nurturing activities that fit how they feel right now: breathing or grounding exercises, a mindful walk, gratitude, journaling prompts, gentle self-care, encouraging affirmations. Tailor every suggestion to what they wrote.

This is a one-time reply read on a phone. Do not ask follow-up questions.

Reply ONLY with a JSON object of this exact shape:
{
  "text": "a short, warm reflection (2-3 sentences)",
  "personalized_exercises": ["short activity 1", "short activity 2", "short activity 3", "short activity 4"]
}
Give 4-5 exercises, each one short line."#;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Body of a chat-completion call; built once per submission.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModelRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// "Q: …\nA: …" pairs separated by blank lines.
pub fn format_answers(entry: &JournalEntry) -> String {
    entry
        .answers
        .iter()
        .map(|a| format!("Q: {}\nA: {}", a.question, a.answer))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn build_request(entry: &JournalEntry, params: &GenerationParams) -> ModelRequest {
    ModelRequest {
        model: params.model.clone(),
        messages: vec![
            ChatMessage {
                role: ChatRole::System,
                content: COUNSELOR_PERSONA.to_string(),
            },
            ChatMessage {
                role: ChatRole::User,
                content: format_answers(entry),
            },
        ],
        temperature: params.temperature,
    }
}
