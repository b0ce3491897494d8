use axum::Json;
use serde_json::{json, Value};
use validator::Validate;

use crate::dto::{TherapistRequest, TherapistResponse};
use crate::error::{AppError, AppResult};
use crate::services::therapist::{reply_to, GREETING};

pub async fn greeting() -> Json<Value> {
    Json(json!({ "reply": GREETING }))
}

pub async fn reply(Json(body): Json<TherapistRequest>) -> AppResult<Json<TherapistResponse>> {
    body.validate()?;

    let reply = reply_to(&body.message, &mut rand::thread_rng())
        .ok_or_else(|| AppError::Validation("Message must not be blank".into()))?;

    Ok(Json(TherapistResponse {
        reply: reply.to_string(),
    }))
}
