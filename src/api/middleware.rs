use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::{
    body::Body,
    extract::Request,
    http::header::HeaderValue,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use tower::{Layer, Service};
use uuid::Uuid;

use crate::metrics;

#[derive(Clone, Debug)]
pub struct CorrelationId(pub String);

impl CorrelationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct CorrelationIdLayer;

impl<S> Layer<S> for CorrelationIdLayer {
    type Service = CorrelationIdMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorrelationIdMiddleware { inner }
    }
}

#[derive(Clone)]
pub struct CorrelationIdMiddleware<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for CorrelationIdMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let correlation_id = req
            .headers()
            .get("X-Correlation-Id")
            .and_then(|v| v.to_str().ok())
            .map(|s| CorrelationId(s.to_string()))
            .unwrap_or_else(CorrelationId::new);

        req.extensions_mut().insert(correlation_id.clone());

        let mut inner = self.inner.clone();
        Box::pin(async move {
            let mut response = inner.call(req).await?;
            response.headers_mut().insert(
                "X-Correlation-Id",
                HeaderValue::from_str(&correlation_id.0)
                    .unwrap_or_else(|_| HeaderValue::from_static("unknown")),
            );
            Ok(response)
        })
    }
}

#[derive(Clone)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsMiddleware { inner }
    }
}

#[derive(Clone)]
pub struct MetricsMiddleware<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for MetricsMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = normalize_path(req.uri().path());

        let mut inner = self.inner.clone();
        Box::pin(async move {
            let response = inner.call(req).await?;
            let duration = start.elapsed();
            let status = response.status().as_u16();

            metrics::record_http_request(&method, &path, status, duration);

            Ok(response)
        })
    }
}

/// Collapses record ids so metrics labels stay low-cardinality:
/// `/dogs/42` becomes `/dogs/{id}`.
fn normalize_path(path: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut prev = "";

    for part in path.split('/') {
        if prev == "dogs" && !part.is_empty() {
            parts.push("{id}".to_string());
        } else {
            parts.push(part.to_string());
        }
        prev = part;
    }

    parts.join("/")
}

/// Last-resort containment for anything that escapes a handler: render the
/// uniform error envelope instead of letting the connection drop.
pub fn handle_panic(_err: Box<dyn Any + Send + 'static>) -> Response {
    let body = json!({
        "error": "Internal Server Error",
        "code": "INTERNAL_ERROR",
        "timestamp": Utc::now().to_rfc3339()
    });

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_collapses_dog_ids() {
        assert_eq!(normalize_path("/dogs/42"), "/dogs/{id}");
        assert_eq!(normalize_path("/dogs/abc"), "/dogs/{id}");
    }

    #[test]
    fn test_normalize_path_leaves_static_routes_alone() {
        assert_eq!(normalize_path("/dogs"), "/dogs");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("/health"), "/health");
    }
}
