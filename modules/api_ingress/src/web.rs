use std::{any::Any, sync::Arc};

use axum::{
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    Extension,
};
use modkit::Problem;
use serde_json::{json, Value};

use crate::request_id;

/// Static facts about the running service, shared with the built-in handlers.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub app_name: String,
    pub openapi: Arc<Value>,
}

pub async fn health_check(Extension(info): Extension<ServiceInfo>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "app": info.app_name,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn openapi_json(Extension(info): Extension<ServiceInfo>) -> Json<Value> {
    Json(info.openapi.as_ref().clone())
}

/// Problem response for routes no module registered.
pub async fn route_not_found(uri: Uri, headers: HeaderMap) -> Problem {
    let problem = Problem::new(
        StatusCode::NOT_FOUND,
        "ROUTE_NOT_FOUND",
        "Not Found",
        format!("No route for {}", uri.path()),
    )
    .at(uri.path());

    match headers
        .get(request_id::header())
        .and_then(|v| v.to_str().ok())
    {
        Some(rid) => problem.for_request(rid),
        None => problem,
    }
}

/// Converts a handler panic into a 500 problem; the payload is logged, never returned.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = details, "Handler panicked");

    Problem::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_PANIC",
        "Internal Server Error",
        "The server encountered an unexpected condition",
    )
    .into_response()
}
