use crate::error::{ApiError, ErrorResponse};
use crate::models::{DeleteResponse, KvResponse};
use crate::routes;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value as JsonValue;

/// GET /kv/:key handler - Retrieve a value
#[utoipa::path(
    get,
    path = routes::KV_ITEM,
    params(
        ("key" = String, Path, description = "Key of the entry")
    ),
    responses(
        (status = 200, description = "Entry found", body = KvResponse),
        (status = 404, description = "Key not found", body = ErrorResponse)
    ),
    tag = "kv"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<(StatusCode, Json<KvResponse>), ApiError> {
    match state.store.get(&key) {
        Some(value) => {
            tracing::debug!("Retrieved entry with key: {}", key);
            Ok((StatusCode::OK, Json(KvResponse { key, value })))
        }
        None => {
            tracing::debug!("Entry not found with key: {}", key);
            Err(ApiError::NotFound)
        }
    }
}

/// PUT /kv/:key handler - Store a value
///
/// The body must be a JSON object with a `value` field. `null` counts as a
/// value; a missing field leaves the store untouched.
#[utoipa::path(
    put,
    path = routes::KV_ITEM,
    params(
        ("key" = String, Path, description = "Key of the entry")
    ),
    request_body(content = serde_json::Value, description = "JSON object with a `value` field of any type"),
    responses(
        (status = 200, description = "Entry stored", body = KvResponse),
        (status = 400, description = "Missing `value` field or invalid JSON", body = ErrorResponse),
        (status = 413, description = "Body exceeds the size limit", body = ErrorResponse),
        (status = 415, description = "Missing JSON content type", body = ErrorResponse)
    ),
    tag = "kv"
)]
pub async fn put_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<(StatusCode, Json<KvResponse>), ApiError> {
    let Json(mut body) = body?;

    let value = body
        .as_object_mut()
        .and_then(|fields| fields.remove("value"))
        .ok_or(ApiError::ValueRequired)?;

    let replaced = state.store.put(key.clone(), value.clone()).is_some();

    tracing::info!(
        "Stored entry with key: {} ({}, {} entries)",
        key,
        if replaced { "overwritten" } else { "created" },
        state.store.len()
    );
    Ok((StatusCode::OK, Json(KvResponse { key, value })))
}

/// DELETE /kv/:key handler - Remove a value
///
/// Idempotent: deleting an absent key succeeds the same way.
#[utoipa::path(
    delete,
    path = routes::KV_ITEM,
    params(
        ("key" = String, Path, description = "Key of the entry")
    ),
    responses(
        (status = 200, description = "Entry removed or already absent", body = DeleteResponse)
    ),
    tag = "kv"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> (StatusCode, Json<DeleteResponse>) {
    if state.store.delete(&key) {
        tracing::info!("Deleted entry with key: {}", key);
    } else {
        tracing::debug!("Delete of absent key: {}", key);
    }

    (StatusCode::OK, Json(DeleteResponse { deleted: key }))
}
