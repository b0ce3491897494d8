use axum::{
    extract::{Query, State},
    Extension, Json,
};

use crate::auth::middleware::AuthUser;
use crate::dto::{HistoryQuery, HistoryResponse};
use crate::error::{AppError, AppResult};
use crate::models::mood::Mood;
use crate::services::history::{group_by_month, stats};
use crate::AppState;

pub async fn list_history(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<HistoryResponse>> {
    let filter = match query.mood.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(label) if label.eq_ignore_ascii_case("all") => None,
        Some(label) => Some(
            Mood::from_label(label)
                .ok_or_else(|| AppError::Validation(format!("Unknown mood filter: {}", label)))?,
        ),
    };

    let entries = state.history.list(auth_user.id, filter).await;
    let stats = stats(&entries);

    Ok(Json(HistoryResponse {
        months: group_by_month(entries),
        stats,
    }))
}
