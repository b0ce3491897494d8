use axum::{extract::State, Extension, Json};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::Session;
use crate::dto::{AnalyzeRequest, AnalyzeResponse};
use crate::error::{AppError, AppResult};
use crate::services::history::{HistoryStore, MoodEntry};
use crate::services::request_builder::GenerationParams;
use crate::services::submission::{send, Submission, SubmissionState};
use crate::AppState;

pub async fn analyze_journal(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(body): Json<AnalyzeRequest>,
) -> AppResult<Json<AnalyzeResponse>> {
    body.validate()?;

    let params = GenerationParams {
        model: state.config.openai_model.clone(),
        temperature: state.config.openai_temperature,
    };

    let mut submission = Submission::new();
    submission.select_mood(&body.mood)?;
    submission.fill(&body.answers)?;
    let (ticket, request) = submission.submit(&params)?;

    tracing::info!(
        mood = %body.mood,
        signed_in = session.is_present(),
        "Analyzing journal entry"
    );

    // If the caller disconnects, axum drops this future and the request with it.
    let outcome = send(&state.llm, &request).await;
    submission.resolve(ticket, outcome);

    match submission.into_state() {
        SubmissionState::Succeeded { draft, reply } => {
            let saved = record_if_signed_in(
                &state.history,
                session.user().map(|u| u.id),
                &draft.mood_label,
                &reply.narrative,
            )
            .await;

            Ok(Json(AnalyzeResponse {
                mood: draft.mood_label,
                narrative: reply.narrative,
                suggestions: reply.suggestions,
                saved,
            }))
        }
        SubmissionState::Failed { error, .. } => Err(error.into()),
        other => Err(AppError::Internal(anyhow::anyhow!(
            "submission ended in unexpected state {}",
            other.name()
        ))),
    }
}

/// History is a signed-in feature; anonymous entries are not kept.
async fn record_if_signed_in(
    history: &HistoryStore,
    user_id: Option<Uuid>,
    mood_label: &str,
    narrative: &str,
) -> bool {
    let Some(user_id) = user_id else {
        return false;
    };
    history
        .record(user_id, MoodEntry::new(mood_label, narrative, Utc::now()))
        .await;
    true
}
