//! Stand-ins for the text-generation service, served from loopback.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::IntoResponse,
    Router,
};
use tokio::sync::Mutex;

/// A request as seen by a recording stub.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Answers every request with `status` and `body`.
pub async fn spawn_stub(status: StatusCode, body: &'static str) -> String {
    let app = Router::new().fallback(move || async move {
        (status, [(CONTENT_TYPE, "application/json")], body).into_response()
    });
    serve(app).await
}

/// Answers after `delay`, long enough to trip a short client timeout.
pub async fn spawn_slow_stub(delay: Duration) -> String {
    let app = Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        (StatusCode::OK, r#"{"choices":[]}"#).into_response()
    });
    serve(app).await
}

/// Replies with a completion whose content is `content`, recording each request.
pub async fn spawn_recording_stub(content: &str) -> (String, Arc<Mutex<Vec<RecordedRequest>>>) {
    let seen: Arc<Mutex<Vec<RecordedRequest>>> = Arc::default();
    let reply = serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
    .to_string();

    let log = seen.clone();
    let app = Router::new().fallback(
        move |uri: axum::http::Uri, headers: HeaderMap, body: String| {
            let log = log.clone();
            let reply = reply.clone();
            async move {
                log.lock().await.push(RecordedRequest {
                    path: uri.path().to_string(),
                    authorization: headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                    body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
                });
                (StatusCode::OK, [(CONTENT_TYPE, "application/json")], reply).into_response()
            }
        },
    );

    (serve(app).await, seen)
}
