// handlers/public/fallback.rs - any unrouted path

use axum::http::{Method, Uri};

use crate::error::ApiError;

pub async fn not_found(uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "No route matched");
    ApiError::not_found(format!("Route {} not found", uri.path()))
}

/// Known path, unsupported method
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::method_not_allowed(format!("{} not allowed on {}", method, uri.path()))
}
