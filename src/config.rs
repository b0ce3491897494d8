use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    /// Shared secret of the identity provider; used only to verify its access tokens.
    pub session_jwt_secret: String,

    // Text-generation service. The key stays on this side of the wire.
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub openai_temperature: f32,
    pub llm_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:8081".into()),

            session_jwt_secret: env::var("SESSION_JWT_SECRET")
                .expect("SESSION_JWT_SECRET must be set"),

            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_else(|_| String::new()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-3.5-turbo".into()),
            openai_temperature: env::var("OPENAI_TEMPERATURE")
                .unwrap_or_else(|_| "0.7".into())
                .parse()
                .unwrap_or(0.7),
            llm_timeout_secs: env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .unwrap_or(30),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    pub fn llm_configured(&self) -> bool {
        !self.openai_api_key.trim().is_empty()
    }
}

#[cfg(test)]
impl Config {
    /// Configuration pointing the text-generation client at `base_url`.
    pub fn for_tests(base_url: &str) -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:8081".into(),
            session_jwt_secret: "test-session-secret".into(),
            openai_api_key: "sk-test".into(),
            openai_base_url: base_url.into(),
            openai_model: "gpt-3.5-turbo".into(),
            openai_temperature: 0.7,
            llm_timeout_secs: 5,
        }
    }
}
