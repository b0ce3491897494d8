use std::time::Duration;

use reqwest::Client;

use crate::error::AnalysisError;
use crate::services::request_builder::ModelRequest;

/// Chat-completion client. One attempt per call, no retries.
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl CompletionClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Sends `request` and returns the first choice's message content.
    pub async fn complete(&self, request: &ModelRequest) -> Result<String, AnalysisError> {
        if self.api_key.trim().is_empty() {
            return Err(AnalysisError::Service(
                "text-generation API key is not configured".into(),
            ));
        }

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(network_failure)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), body = %body, "Completion request rejected");
            return Err(AnalysisError::Network {
                status: Some(status.as_u16()),
                timed_out: false,
                message: format!("upstream returned {}", status),
            });
        }

        let body = response.text().await.map_err(network_failure)?;
        extract_content(&body)
    }
}

fn network_failure(e: reqwest::Error) -> AnalysisError {
    AnalysisError::Network {
        status: e.status().map(|s| s.as_u16()),
        timed_out: e.is_timeout(),
        message: e.to_string(),
    }
}

/// Pulls `choices[0].message.content` out of a completion body.
fn extract_content(body: &str) -> Result<String, AnalysisError> {
    let json: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| AnalysisError::Service(format!("completion body is not JSON: {}", e)))?;

    let choices = json
        .get("choices")
        .and_then(|c| c.as_array())
        .ok_or_else(|| AnalysisError::Service("completion has no \"choices\" field".into()))?;

    let first = choices
        .first()
        .ok_or_else(|| AnalysisError::Service("completion has an empty \"choices\" list".into()))?;

    first["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| AnalysisError::Service("first choice carries no message content".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::journal::JournalEntry;
    use crate::services::request_builder::{build_request, GenerationParams};
    use crate::test_support::{spawn_stub, spawn_slow_stub};
    use axum::http::StatusCode;

    fn request() -> ModelRequest {
        let entry = JournalEntry::for_mood("Sad", &["a", "b", "c"]).unwrap();
        build_request(&entry, &GenerationParams::default())
    }

    fn client(base_url: &str) -> CompletionClient {
        CompletionClient::new(base_url, "sk-test", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_returns_first_choice_content() {
        let base = spawn_stub(
            StatusCode::OK,
            r#"{"choices":[{"message":{"role":"assistant","content":"hello"}},{"message":{"content":"ignored"}}]}"#,
        )
        .await;

        let content = client(&base).complete(&request()).await.unwrap();
        assert_eq!(content, "hello");
    }

    #[tokio::test]
    async fn test_server_error_is_network_failure_with_status() {
        let base = spawn_stub(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"boom"}"#).await;

        let err = client(&base).complete(&request()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Network { status: Some(500), .. }), "{:?}", err);
    }

    #[tokio::test]
    async fn test_missing_choices_is_service_failure() {
        let base = spawn_stub(StatusCode::OK, r#"{"id":"cmpl-1","object":"chat.completion"}"#).await;

        let err = client(&base).complete(&request()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Service(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn test_empty_choices_is_service_failure() {
        let base = spawn_stub(StatusCode::OK, r#"{"choices":[]}"#).await;

        let err = client(&base).complete(&request()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Service(_)));
    }

    #[tokio::test]
    async fn test_non_json_body_is_service_failure() {
        let base = spawn_stub(StatusCode::OK, "<html>gateway</html>").await;

        let err = client(&base).complete(&request()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Service(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_network_failure() {
        let base = spawn_slow_stub(Duration::from_secs(3)).await;
        let client = CompletionClient::new(&base, "sk-test", Duration::from_millis(200)).unwrap();

        let err = client.complete(&request()).await.unwrap_err();
        assert!(
            matches!(err, AnalysisError::Network { status: None, timed_out: true, .. }),
            "{:?}",
            err
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_failure() {
        // Nothing listens on port 9 of loopback in the test environment.
        let client = client("http://127.0.0.1:9");

        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Network { status: None, .. }));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_service_failure() {
        let client = CompletionClient::new("http://127.0.0.1:9", "", Duration::from_secs(1)).unwrap();

        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Service(_)));
    }
}
