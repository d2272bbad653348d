//! # Salesboard Web Server
//!
//! Serves the dashboard page and its JSON twin. Every request fetches the
//! sheet again and recomputes everything; the shared state holds nothing but
//! configuration.

use analytics::AnalyticsEngine;
use anyhow::Context;
use axum::{routing::get, Router};
use configuration::{AnalyticsSettings, Config, ServerConfig};
use ledger_loader::LedgerLoader;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod render;
pub mod view;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub loader: LedgerLoader,
    pub engine: AnalyticsEngine,
    pub settings: AnalyticsSettings,
    pub title: String,
}

impl AppState {
    pub fn new(loader: LedgerLoader, settings: AnalyticsSettings, title: impl Into<String>) -> Self {
        Self {
            loader,
            engine: AnalyticsEngine::new(&settings),
            settings,
            title: title.into(),
        }
    }

    /// State reading the sheet named in `config.source` over HTTP.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            LedgerLoader::from_config(&config.source),
            config.analytics.clone(),
            config.dashboard.title.clone(),
        )
    }
}

/// Builds the router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/", get(handlers::dashboard_page))
        .route("/api/dashboard", get(handlers::dashboard_json))
        .route("/api/health", get(handlers::health))
        .with_state(state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialised by the caller.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let listener = bind_listener(&config.server).await?;
    let app = build_router(Arc::new(AppState::from_config(&config)));

    tracing::info!(
        source = %config.source.url,
        timezone = %config.analytics.timezone,
        "Web server listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// Binds the configured host and port, resolving host names such as `localhost`.
pub async fn bind_listener(server: &ServerConfig) -> anyhow::Result<tokio::net::TcpListener> {
    let (host, port) = server.bind_target();
    tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))
}
