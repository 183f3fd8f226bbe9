use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

pub const NOT_FOUND: &str = "Not found";
pub const VALUE_REQUIRED: &str = "value required";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Internal failure detail, only present in debug mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
        }
    }
}

/// Custom error type for API endpoints
///
/// Client errors are answered with a short JSON message. Internal errors are
/// logged in full here and reach the client as a generic message.
#[derive(Debug)]
pub enum ApiError {
    /// Key absent from the store, or no route matched
    NotFound,
    /// PUT body without a `value` field
    ValueRequired,
    /// PUT body that could not be read as JSON; keeps the rejection's status
    InvalidBody { status: StatusCode, message: String },
    /// Any unexpected failure inside a handler
    Internal {
        source: anyhow::Error,
        expose_detail: bool,
    },
}

impl ApiError {
    pub fn internal(source: anyhow::Error, expose_detail: bool) -> Self {
        ApiError::Internal {
            source,
            expose_detail,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, ErrorResponse::new(NOT_FOUND)),
            ApiError::ValueRequired => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(VALUE_REQUIRED))
            }
            ApiError::InvalidBody { status, message } => (
                status,
                ErrorResponse::new(format!("Invalid JSON body: {}", message)),
            ),
            ApiError::Internal {
                source,
                expose_detail,
            } => {
                tracing::error!("Request failed: {:#}", source);
                let mut body = ErrorResponse::new(INTERNAL_ERROR);
                if expose_detail {
                    body.detail = Some(format!("{:#}", source));
                }
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Turns a handler panic into the generic internal error response
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!("Handler panicked: {}", message);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(INTERNAL_ERROR)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    async fn body_of(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(response).await, serde_json::json!({"error": "Not found"}));
    }

    #[tokio::test]
    async fn test_value_required_body() {
        let response = ApiError::ValueRequired.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(response).await,
            serde_json::json!({"error": "value required"})
        );
    }

    #[tokio::test]
    async fn test_invalid_body_keeps_status() {
        let response = ApiError::InvalidBody {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "length limit exceeded".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body_of(response).await,
            serde_json::json!({"error": "Invalid JSON body: length limit exceeded"})
        );
    }

    #[tokio::test]
    async fn test_internal_hides_detail() {
        let response = ApiError::internal(anyhow!("disk on fire"), false).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_of(response).await;
        assert_eq!(body, serde_json::json!({"error": "Internal server error"}));
        assert!(!body.to_string().contains("disk on fire"));
    }

    #[tokio::test]
    async fn test_internal_exposes_detail_in_debug() {
        let response = ApiError::internal(anyhow!("disk on fire"), true).into_response();
        let body = body_of(response).await;
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["detail"], "disk on fire");
    }

    #[tokio::test]
    async fn test_panic_response() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_of(response).await,
            serde_json::json!({"error": "Internal server error"})
        );
    }
}
