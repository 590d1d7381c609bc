//! Good Habits API Server
//!
//! REST API over the users, categories and habits stores.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use std::any::Any;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
pub mod routes;
mod settings;

pub use error::ApiError;
pub use settings::{ApiConfig, LoggingConfig, PaginationConfig, ServerConfig, StorageConfig};

use storage::{Category, Habit, Page, Repository, StorageError, User};

/// Application state shared across handlers
pub struct AppState {
    /// Entity stores
    pub repository: Repository,
    pub config: ApiConfig,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
    /// Prometheus recorder, when one is installed
    pub metrics: Option<PrometheusHandle>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Create new application state, seeding the stores if configured
    pub fn new(config: ApiConfig) -> Result<Self, StorageError> {
        let repository = if config.storage.seed_fixtures {
            Repository::seeded()?
        } else {
            Repository::new()
        };

        Ok(Self {
            repository,
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Resolve list paging parameters against the configured defaults
    pub fn page(&self, limit: Option<usize>, offset: Option<usize>) -> Page {
        Page {
            limit: limit.unwrap_or(self.config.pagination.default_limit),
            offset: offset.unwrap_or(0),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub counts: StoreCounts,
}

/// Records held by each store
#[derive(Debug, Serialize)]
pub struct StoreCounts {
    pub users: usize,
    pub categories: usize,
    pub habits: usize,
}

/// Create the application router
pub fn create_router(state: SharedState) -> Router {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route(
            "/users",
            get(routes::users::list)
                .post(routes::create::<User>)
                .put(routes::update::<User>)
                .delete(routes::delete::<User>),
        )
        .route(
            "/categories",
            get(routes::categories::list)
                .post(routes::create::<Category>)
                .put(routes::update::<Category>)
                .delete(routes::delete::<Category>),
        )
        .route(
            "/habits",
            get(routes::habits::list)
                .post(routes::create::<Habit>)
                .put(routes::update::<Habit>)
                .delete(routes::delete::<Habit>),
        );

    with_layers(router, &state.config.server).with_state(state)
}

/// Request tracing, panic recovery and CORS around every route
fn with_layers(router: Router<SharedState>, server: &ServerConfig) -> Router<SharedState> {
    let cors = if server.cors_permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(cors),
    )
}

/// Turn a handler panic into a 500 carrying the panic message
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else {
        "handler panicked".to_string()
    };
    ApiError::Internal(detail).into_response()
}

/// Health check handler
async fn health_handler(
    State(state): State<SharedState>,
) -> Result<Json<HealthResponse>, ApiError> {
    let repository = &state.repository;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        counts: StoreCounts {
            users: repository.users().len()?,
            categories: repository.categories().len()?,
            habits: repository.habits().len()?,
        },
    }))
}

/// Prometheus scrape handler
async fn metrics_handler(State(state): State<SharedState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::NOT_FOUND,
            "metrics recorder not installed".to_string(),
        ),
    }
}

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let level: Level = config.level.parse()?;
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Run the server until Ctrl-C
pub async fn run_server(config: ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = PrometheusBuilder::new().install_recorder()?;
    let addr = config.server.bind_addr.clone();

    let state = Arc::new(AppState::new(config)?.with_metrics(metrics));
    let app = create_router(state);

    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults() {
        let state = AppState::new(ApiConfig::default()).unwrap();
        assert_eq!(state.page(None, None), Page { limit: 10, offset: 0 });
        assert_eq!(state.page(Some(2), Some(1)), Page { limit: 2, offset: 1 });
    }

    #[test]
    fn test_configured_default_limit() {
        let mut config = ApiConfig::default();
        config.pagination.default_limit = 3;
        let state = AppState::new(config).unwrap();
        assert_eq!(state.page(None, Some(4)).limit, 3);
    }

    #[test]
    fn test_unseeded_state() {
        let mut config = ApiConfig::default();
        config.storage.seed_fixtures = false;
        let state = AppState::new(config).unwrap();
        assert!(state.repository.users().is_empty().unwrap());
        assert!(state.metrics.is_none());
    }

    #[tokio::test]
    async fn test_health_counts() {
        let state = Arc::new(AppState::new(ApiConfig::default()).unwrap());
        let Json(health) = health_handler(State(state)).await.unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.counts.users, 3);
        assert_eq!(health.counts.categories, 3);
        assert_eq!(health.counts.habits, 4);
    }

    async fn boom() -> &'static str {
        panic!("boom")
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_internal_error() {
        let state = Arc::new(AppState::new(ApiConfig::default()).unwrap());
        let app = with_layers(
            Router::new().route("/boom", get(boom)),
            &ServerConfig::default(),
        )
        .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let response = reqwest::get(format!("http://{}/boom", addr)).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["status"], 500);
        assert_eq!(body["detail"], "Internal error: boom");
    }

    #[test]
    fn test_panic_response_without_message() {
        let response = panic_response(Box::new(42u8));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
