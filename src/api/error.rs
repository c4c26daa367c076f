use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;

use crate::storage::StorageError;

/// Handler-level failures and their fixed wire shapes. The per-variant
/// bodies are part of the public contract and differ between routes, so
/// translation lives here rather than in the handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Path id did not parse as an integer.
    InvalidId,
    /// Create body carried keys outside the allowed set.
    InvalidKeys(Vec<String>),
    /// Create body field type errors, reported as a list.
    FieldErrors(Vec<String>),
    /// Any update failure, including not-found. The empty `errors` payload
    /// is inherited contract.
    UpdateRejected,
    /// Store failure during create: invalid-input kinds map to 400,
    /// everything else to 500, both carrying the error message.
    CreateFailed(StorageError),
    /// Store failure during delete.
    DeleteFailed(StorageError),
    /// Store failure that escaped a handler without a route-specific shape
    /// (list, show, readiness). Rendered in the uniform error envelope.
    DatabaseError(StorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidId => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "id should be a number" })),
            )
                .into_response(),
            ApiError::InvalidKeys(keys) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "errors": [format!("'{}' is not a valid key", keys.join("', '"))]
                })),
            )
                .into_response(),
            ApiError::FieldErrors(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::UpdateRejected => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": "" }))).into_response()
            }
            ApiError::CreateFailed(e) => {
                let status = if e.is_invalid_input() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, Json(json!({ "errors": [e.to_string()] }))).into_response()
            }
            ApiError::DeleteFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Internal Server Error" })),
            )
                .into_response(),
            ApiError::DatabaseError(e) => {
                let (status, code) = if e.is_connection_error() {
                    (StatusCode::SERVICE_UNAVAILABLE, "DATABASE_UNAVAILABLE")
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR")
                };

                let body = json!({
                    "error": e.to_string(),
                    "code": code,
                    "timestamp": Utc::now().to_rfc3339()
                });

                (status, Json(body)).into_response()
            }
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::DatabaseError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_id_renders_400_message() {
        let (status, body) = render(ApiError::InvalidId).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "id should be a number");
    }

    #[tokio::test]
    async fn test_invalid_keys_joined_into_single_error() {
        let err = ApiError::InvalidKeys(vec!["foo".to_string(), "bar".to_string()]);
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0], "'foo', 'bar' is not a valid key");
    }

    #[tokio::test]
    async fn test_field_errors_listed() {
        let err = ApiError::FieldErrors(vec![
            "name should be a string".to_string(),
            "age should be a number".to_string(),
        ]);
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
        assert_eq!(body["errors"][1], "age should be a number");
    }

    #[tokio::test]
    async fn test_update_rejected_has_empty_errors_payload() {
        let (status, body) = render(ApiError::UpdateRejected).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"], "");
    }

    #[tokio::test]
    async fn test_create_invalid_input_maps_to_400() {
        let err = ApiError::CreateFailed(StorageError::InvalidInput(
            "age should be a number".to_string(),
        ));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0], "Invalid input: age should be a number");
    }

    #[tokio::test]
    async fn test_create_other_store_error_maps_to_500() {
        let err = ApiError::CreateFailed(StorageError::DatabaseError(sqlx::Error::PoolClosed));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["errors"][0].as_str().unwrap().starts_with("Database error"));
    }

    #[tokio::test]
    async fn test_delete_failure_is_generic_500() {
        let err = ApiError::DeleteFailed(StorageError::DatabaseError(sqlx::Error::PoolClosed));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal Server Error");
    }

    #[tokio::test]
    async fn test_connection_error_renders_503_envelope() {
        let err = ApiError::DatabaseError(StorageError::DatabaseError(sqlx::Error::PoolTimedOut));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "DATABASE_UNAVAILABLE");
        assert!(body["timestamp"].is_string());
    }
}
