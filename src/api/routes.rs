use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::storage::DogRepository;

use super::handlers;
use super::middleware::{handle_panic, CorrelationIdLayer, MetricsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<DogRepository>,
    pub metrics_handle: PrometheusHandle,
}

async fn metrics_handler(axum::extract::State(state): axum::extract::State<AppState>) -> String {
    state.metrics_handle.render()
}

pub fn create_router(repository: Arc<DogRepository>, metrics_handle: PrometheusHandle) -> Router {
    let state = AppState {
        repository,
        metrics_handle,
    };

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::ready_check))
        .route("/metrics", get(metrics_handler))
        .route("/dogs", get(handlers::list_dogs))
        .route("/dogs", post(handlers::create_dog))
        .route("/dogs/{id}", get(handlers::show_dog))
        .route("/dogs/{id}", patch(handlers::update_dog))
        .route("/dogs/{id}", delete(handlers::delete_dog))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorrelationIdLayer)
        .layer(MetricsLayer)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
