use axum::Json;
use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::models::{DeleteResponse, HealthSnapshot, KvResponse, MemoryUsage};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "rust-memory-kv API",
        version = "1.0.0",
        description = "A minimal in-memory JSON key-value store with a health endpoint"
    ),
    paths(
        handlers::index::index_handler,
        handlers::health::health_handler,
        handlers::kv::get_handler,
        handlers::kv::put_handler,
        handlers::kv::delete_handler
    ),
    components(
        schemas(
            KvResponse,
            DeleteResponse,
            HealthSnapshot,
            MemoryUsage,
            ErrorResponse
        )
    ),
    tags(
        (name = "index", description = "Landing page"),
        (name = "health", description = "Health check operations"),
        (name = "kv", description = "Key-value store operations")
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json handler
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
