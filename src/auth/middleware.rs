use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    #[allow(dead_code)]
    pub email: Option<String>,
}

/// Whether the caller is signed in with the identity provider.
#[derive(Debug, Clone, Default)]
pub struct Session(pub Option<AuthUser>);

impl Session {
    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.0.as_ref()
    }
}

fn session_from_request(state: &AppState, req: &Request) -> Session {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return Session(None);
    };

    match verify_token(token, &state.config) {
        Ok(data) => Session(Some(AuthUser {
            id: data.claims.sub,
            email: data.claims.email.filter(|e| !e.is_empty()),
        })),
        Err(_) => Session(None),
    }
}

/// Resolves the optional session for every request. A bad token is treated
/// as "not signed in", never as an error.
pub async fn attach_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let session = session_from_request(&state, &req);
    req.extensions_mut().insert(session);
    next.run(req).await
}

/// Rejects requests without a verified session.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = match req.extensions().get::<Session>() {
        Some(session) => session.clone(),
        None => session_from_request(&state, &req),
    };

    let user = session.0.clone().ok_or(AppError::Unauthorized)?;

    req.extensions_mut().insert(user);
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}
