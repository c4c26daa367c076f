use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::metrics;
use crate::models::Dog;

use super::dto::{HealthResponse, ListDogsQuery, MessageResponse, ReadyResponse};
use super::error::ApiError;
use super::middleware::CorrelationId;
use super::routes::AppState;
use super::validation;

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello World!".to_string(),
    })
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
    })
}

pub async fn ready_check(
    State(state): State<AppState>,
) -> Result<Json<ReadyResponse>, ApiError> {
    let start = Instant::now();
    let result = state.repository.health_check().await;
    metrics::record_db_query_duration("health_check", start.elapsed());

    result?;

    let pool = state.repository.pool_status();
    debug!(
        active = pool.active_connections,
        idle = pool.idle_connections,
        max = pool.max_connections,
        "Connection pool status"
    );

    Ok(Json(ReadyResponse {
        status: "ready".to_string(),
        database: "connected".to_string(),
        timestamp: Utc::now(),
    }))
}

pub async fn list_dogs(
    State(state): State<AppState>,
    Query(query): Query<ListDogsQuery>,
) -> Result<Json<Vec<Dog>>, ApiError> {
    let start = Instant::now();
    let dogs = state.repository.list_dogs(query.name_has.as_deref()).await?;
    metrics::record_db_query_duration("list_dogs", start.elapsed());

    Ok(Json(dogs))
}

pub async fn create_dog(
    State(state): State<AppState>,
    Extension(correlation_id): Extension<CorrelationId>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Dog>), ApiError> {
    let new_dog = validation::parse_new_dog(&body)?;

    let start = Instant::now();
    let result = state.repository.create_dog(&new_dog).await;
    metrics::record_db_query_duration("create_dog", start.elapsed());

    match result {
        Ok(dog) => Ok((StatusCode::CREATED, Json(dog))),
        Err(e) => {
            error!(correlation_id = %correlation_id.0, error = %e, "Failed to create dog");
            Err(ApiError::CreateFailed(e))
        }
    }
}

pub async fn show_dog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = validation::parse_id(&id)?;

    let start = Instant::now();
    let dog = state.repository.get_dog(id).await?;
    metrics::record_db_query_duration("get_dog", start.elapsed());

    // Absence is signalled by status alone: 204, not 404.
    match dog {
        Some(dog) => Ok(Json(dog).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

pub async fn update_dog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(correlation_id): Extension<CorrelationId>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Dog>), ApiError> {
    let id = validation::parse_id(&id)?;
    let patch = validation::parse_dog_patch(&body)?;

    let start = Instant::now();
    let result = state.repository.update_dog(id, &patch).await;
    metrics::record_db_query_duration("update_dog", start.elapsed());

    match result {
        // 201 on a successful update is inherited contract.
        Ok(dog) => Ok((StatusCode::CREATED, Json(dog))),
        Err(e) => {
            warn!(correlation_id = %correlation_id.0, dog_id = id, error = %e, "Update rejected");
            Err(ApiError::UpdateRejected)
        }
    }
}

pub async fn delete_dog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(correlation_id): Extension<CorrelationId>,
) -> Result<Response, ApiError> {
    let id = validation::parse_id(&id)?;

    let start = Instant::now();
    let result = state.repository.delete_dog(id).await;
    metrics::record_db_query_duration("delete_dog", start.elapsed());

    match result {
        Ok(Some(dog)) => Ok(Json(dog).into_response()),
        Ok(None) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(e) => {
            error!(correlation_id = %correlation_id.0, dog_id = id, error = %e, "Failed to delete dog");
            Err(ApiError::DeleteFailed(e))
        }
    }
}
