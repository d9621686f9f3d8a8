//! Axum server setup
//!
//! Server skeleton with:
//! - Store injected once through shared state
//! - Tracing and request timeout middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::VisitStore;
use crate::models::{ActiveUserPolicy, VisitPolicy, DEFAULT_ACTIVE_USER};

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3000)
    pub bind_addr: SocketAddr,

    /// Upper bound on a single request, including its queries
    pub request_timeout: Duration,

    /// Whether repeat visits to a country are recorded
    pub visit_policy: VisitPolicy,

    /// Member shown by `GET /`
    pub active_user: ActiveUserPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            visit_policy: VisitPolicy::default(),
            active_user: DEFAULT_ACTIVE_USER,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VisitStore>,
    pub visit_policy: VisitPolicy,
    pub active_user: ActiveUserPolicy,
}

impl AppState {
    pub fn new(store: Arc<dyn VisitStore>, visit_policy: VisitPolicy) -> Self {
        Self {
            store,
            visit_policy,
            active_user: DEFAULT_ACTIVE_USER,
        }
    }

    pub fn with_active_user(mut self, active_user: ActiveUserPolicy) -> Self {
        self.active_user = active_user;
        self
    }
}

/// Build the application router with all routes.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ));

    Router::new()
        .merge(routes::health::router())
        .merge(routes::home::router())
        .merge(routes::visits::router())
        .merge(routes::users::router())
        .layer(middleware)
        .with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// run_server(Arc::new(PgStore::new(pool)), ServerConfig::default()).await?;
/// ```
pub async fn run_server(
    store: Arc<dyn VisitStore>,
    config: ServerConfig,
) -> Result<(), ServerError> {
    tracing::info!(
        policy = ?config.visit_policy,
        active_user = ?config.active_user,
        "visit settings"
    );
    let state = AppState::new(store, config.visit_policy).with_active_user(config.active_user);
    let app = build_router(state, config.request_timeout);

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on http://{}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
