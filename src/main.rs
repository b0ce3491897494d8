use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod auth;
mod config;
mod dto;
mod error;
mod handlers;
mod models;
mod services;
#[cfg(test)]
mod test_support;

use config::Config;
use services::history::HistoryStore;
use services::llm_client::CompletionClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm: CompletionClient,
    pub history: HistoryStore,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let llm = CompletionClient::new(
            &config.openai_base_url,
            &config.openai_api_key,
            config.llm_timeout(),
        )?;

        Ok(Self {
            config: Arc::new(config),
            llm,
            history: HistoryStore::new(),
        })
    }
}

pub fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        // Moods & prompts
        .route("/api/moods", get(handlers::moods::list_moods))
        .route("/api/moods/:label", get(handlers::moods::get_mood_prompts))
        // Journal analysis (session optional)
        .route("/api/journal/analyze", post(handlers::journal::analyze_journal))
        // Therapist
        .route("/api/therapist/greeting", get(handlers::therapist::greeting))
        .route("/api/therapist/reply", post(handlers::therapist::reply));

    let protected_routes = Router::new()
        .route("/api/history", get(handlers::history::list_history))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_session,
        ));

    let allowed_origins: Vec<axum::http::HeaderValue> = {
        let mut origins: Vec<axum::http::HeaderValue> =
            state.config.frontend_url.parse().ok().into_iter().collect();
        // Expo dev clients on the LAN
        if let Ok(extra) = std::env::var("CORS_EXTRA_ORIGINS") {
            for o in extra.split(',') {
                if let Ok(hv) = o.trim().parse::<axum::http::HeaderValue>() {
                    origins.push(hv);
                }
            }
        }
        origins
    };
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(handlers::health::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::attach_session,
        ))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodai_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env();
    if !config.llm_configured() {
        tracing::warn!("OPENAI_API_KEY is not set; journal analysis will fail until it is");
    }
    tracing::info!(
        model = %config.openai_model,
        timeout_secs = config.llm_timeout_secs,
        "Text-generation client configured"
    );

    let addr = config.listen_addr();
    let state = AppState::new(config)?;
    let app = app(state);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
