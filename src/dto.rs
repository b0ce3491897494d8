//! # MoodAI: Request/Response DTOs
//!
//! All API contract types in one module.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - Validation is expressed via `validator` derive macros

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::mood::{MoodInfo, MusicProfile};
use crate::services::history::{HistoryStats, MonthGroup};

// ============================================================================
// Moods & prompts
// ============================================================================

/// GET /api/moods
#[derive(Debug, Serialize)]
pub struct MoodListResponse {
    pub moods: Vec<MoodInfo>,
}

/// GET /api/moods/:label
#[derive(Debug, Serialize)]
pub struct MoodPromptsResponse {
    /// `None` when the label is not in the catalog and fallback questions apply
    pub mood: Option<MoodInfo>,
    pub questions: Vec<&'static str>,
    /// Empty for labels outside the catalog
    pub actions: Vec<&'static str>,
    pub music: MusicProfile,
}

// ============================================================================
// Journal analysis
// ============================================================================

/// POST /api/journal/analyze
#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeRequest {
    /// Mood label (e.g., "Sad"). Unknown labels use the fallback questions.
    #[validate(length(min = 1, max = 40, message = "Mood must be 1-40 characters"))]
    pub mood: String,

    /// One answer per question, in question order
    #[validate(length(min = 1, max = 10, message = "Provide 1-10 answers"))]
    pub answers: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub mood: String,
    pub narrative: String,
    pub suggestions: Vec<String>,
    /// True when the entry was added to the caller's history
    pub saved: bool,
}

// ============================================================================
// History
// ============================================================================

/// GET /api/history query params
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Mood label or "all". Default: "all"
    pub mood: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub months: Vec<MonthGroup>,
    pub stats: HistoryStats,
}

// ============================================================================
// Therapist
// ============================================================================

/// POST /api/therapist/reply
#[derive(Debug, Deserialize, Validate)]
pub struct TherapistRequest {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TherapistResponse {
    pub reply: String,
}
