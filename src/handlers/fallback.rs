use crate::error::ApiError;
use axum::http::{Method, Uri};

/// Handler for any request that matches no route
pub async fn not_found_handler(method: Method, uri: Uri) -> ApiError {
    tracing::debug!("No route for {} {}", method, uri);
    ApiError::NotFound
}
