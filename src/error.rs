use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures of a single journal analysis round-trip.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// Transport-level failure, non-2xx status, or timeout.
    #[error("Network failure{}: {message}", status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Network {
        status: Option<u16>,
        timed_out: bool,
        message: String,
    },

    /// The service answered, but not with the expected completion shape.
    #[error("Service failure: {0}")]
    Service(String),

    /// The completion content could not be read as a structured reply.
    #[error("Parse failure: {0}")]
    Parse(String),
}

impl AnalysisError {
    pub fn status(&self) -> Option<u16> {
        match self {
            AnalysisError::Network { status, .. } => *status,
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Network { .. } => "network_failure",
            AnalysisError::Service(_) => "service_failure",
            AnalysisError::Parse(_) => "parse_failure",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Analysis(e) => {
                tracing::warn!(
                    error = %e,
                    kind = e.kind(),
                    upstream_status = ?e.status(),
                    "Journal analysis failed"
                );
                let status = match e {
                    AnalysisError::Network { timed_out: true, .. } => StatusCode::GATEWAY_TIMEOUT,
                    _ => StatusCode::BAD_GATEWAY,
                };
                // Upstream details stay in the logs.
                (status, "Could not get feedback right now. Please try again.".into())
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        let mut body = json!({
            "error": {
                "message": message,
                "code": status.as_u16(),
            }
        });
        if let AppError::Analysis(e) = &self {
            body["error"]["kind"] = json!(e.kind());
        }

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
