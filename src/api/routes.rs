//! HTTP route setup and shared state.

use std::sync::Arc;

use axum::{
    extract::State,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::assistant::Assistant;
use crate::config::Config;
use crate::debug_log;
use crate::store::{self, SharedTaskStore};

use super::recommend;
use super::tasks;
use super::types::HealthResponse;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Task persistence
    pub store: SharedTaskStore,
    /// AI round-trips; `None` when no API key is configured
    pub assistant: Option<Arc<Assistant>>,
}

impl AppState {
    pub fn new(config: Config, store: SharedTaskStore, assistant: Option<Arc<Assistant>>) -> Self {
        Self {
            config,
            store,
            assistant,
        }
    }

    /// Build state from configuration.
    pub fn from_config(config: Config) -> Self {
        let store = store::init_store(&config.supabase);

        let assistant = match config.gemini_client() {
            Ok(Some(client)) => {
                tracing::info!(
                    "AI enabled (model={}, debug={})",
                    config.ai.model,
                    config.ai.debug
                );
                Some(Arc::new(Assistant::new(
                    Arc::new(client),
                    debug_log::sink_for(config.ai.debug),
                )))
            }
            Ok(None) => {
                tracing::warn!("AI disabled (GEMINI_API_KEY not set)");
                None
            }
            Err(e) => {
                tracing::warn!("AI disabled: {}", e);
                None
            }
        };

        Self::new(config, store, assistant)
    }
}

/// Build the router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/api/tasks/:id",
            patch(tasks::update_task).delete(tasks::delete_task),
        )
        .route("/api/recommend", post(recommend::recommend))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::from_config(config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ai_enabled: state.assistant.is_some(),
        ai_model: state.assistant.as_ref().map(|a| a.model().to_string()),
        store: state.store.backend_name().to_string(),
    })
}
