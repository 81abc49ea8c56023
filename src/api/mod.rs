use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::classifier::ClassifierGateway;
use crate::config::Config;
use crate::services::{AuthService, DecisionService, QueryService, StatsService};
use crate::state::SharedState;

pub mod auth;
pub mod decisions;
mod error;
mod observability;
pub mod stats;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn decision_service(&self) -> &Arc<dyn DecisionService> {
        &self.shared.decision_service
    }

    #[must_use]
    pub fn query_service(&self) -> &Arc<dyn QueryService> {
        &self.shared.query_service
    }

    #[must_use]
    pub fn stats_service(&self) -> &Arc<dyn StatsService> {
        &self.shared.stats_service
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

/// Same as [`create_app_state_from_config`] but with a prebuilt gateway, so
/// callers can score with classifiers that are not backed by model files.
pub async fn create_app_state_with_gateway(
    config: Config,
    gateway: ClassifierGateway,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::with_gateway(config, gateway).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().read().await.server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route(
            "/decisions",
            get(decisions::list_decisions).post(decisions::submit_decision),
        )
        .route("/users/{user_id}/decisions", get(decisions::list_user_decisions))
        .route(
            "/users/{user_id}/decisions/latest",
            get(decisions::latest_user_decision),
        )
        .route("/stats", get(stats::get_snapshot))
        .route("/stats/total", get(stats::get_totals))
        .route("/stats/model_success", get(stats::get_model_success))
        .route("/stats/model_comparison", get(stats::get_model_comparison))
        .route("/stats/summary", get(stats::get_summary))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/system/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}
