use axum::{routing::get, Router};
use chrono::{DateTime, Utc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::{AppConfig, Environment};
use crate::handlers;

/// Paths served by the status application
pub const ROUTES: &[&str] = &["/", "/api/status"];

/// Shared, read-only state handed to handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub environment: Environment,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            environment: config.environment,
            started_at: Utc::now(),
        }
    }
}

/// Build a fresh application router. Each caller owns its own handle.
pub fn build_app(config: &AppConfig) -> Router {
    let state = AppState::new(config);

    let router = Router::new()
        // Public
        .route("/", get(handlers::root).fallback(handlers::method_not_allowed))
        .route(
            "/api/status",
            get(handlers::api_status).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.security.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Bind the configured address and serve until the process is stopped
pub async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!(
        "Status server listening on http://{} in {:?} mode",
        listener.local_addr()?,
        config.environment
    );

    axum::serve(listener, build_app(config)).await?;
    Ok(())
}
