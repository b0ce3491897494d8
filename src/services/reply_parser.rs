use serde::Serialize;
use serde_json::Value;

use crate::error::AnalysisError;

const NARRATIVE_KEYS: [&str; 3] = ["text", "narrative", "summary"];
const SUGGESTION_KEYS: [&str; 4] = [
    "personalized_exercises",
    "personalized exercises",
    "suggestions",
    "actionItems",
];

/// Structured feedback for one journal entry.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct AnalysisReply {
    pub narrative: String,
    pub suggestions: Vec<String>,
}

/// Reads model output as `{narrative, suggestions}`.
///
/// Accepts a bare JSON object, an object inside a markdown code fence or
/// surrounding prose, or an object that was JSON-encoded into a string one
/// extra time.
pub fn parse_reply(raw: &str) -> Result<AnalysisReply, AnalysisError> {
    let value = decode(raw)?;

    // Double-encoded: the outer layer is a JSON string holding the object.
    let value = match value {
        Value::String(inner) => decode(&inner)?,
        other => other,
    };

    let object = value.as_object().ok_or_else(|| {
        AnalysisError::Parse(format!("expected a JSON object, got {}", type_name(&value)))
    })?;

    let narrative = NARRATIVE_KEYS
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    let suggestions = SUGGESTION_KEYS
        .iter()
        .find_map(|key| object.get(*key).filter(|v| v.is_array() || v.is_string()))
        .map(suggestion_list)
        .unwrap_or_default();

    Ok(AnalysisReply {
        narrative,
        suggestions,
    })
}

fn decode(raw: &str) -> Result<Value, AnalysisError> {
    let text = strip_code_fence(raw.trim());
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(e) => extract_json_object(raw)
            .and_then(|json| serde_json::from_str(json).ok())
            .ok_or_else(|| AnalysisError::Parse(format!("reply is not valid JSON: {}", e))),
    }
}

/// Finds an object embedded in prose: a ```json fence anywhere in the text,
/// else the span from the first `{` to the last `}`.
fn extract_json_object(raw: &str) -> Option<&str> {
    if let Some(start) = raw.find("```json") {
        let body = &raw[start + 7..];
        if let Some(end) = body.find("```") {
            let json = body[..end].trim();
            if json.starts_with('{') && json.ends_with('}') {
                return Some(json);
            }
        }
    }

    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop an optional language tag on the opening fence line.
    let rest = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn suggestion_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(s) => s
            .lines()
            .map(strip_bullet)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    let line = line.trim_start_matches(['-', '*', '•']);
    // "1." / "2)" numbering
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    let line = if digits > 0 && line[digits..].starts_with(['.', ')']) {
        &line[digits + 1..]
    } else {
        line
    };
    line.trim()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
