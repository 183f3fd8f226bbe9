use crate::api_doc;
use crate::config::Config;
use crate::error;
use crate::handlers;
use crate::routes;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Request},
    routing::get,
    Router,
};
use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

/// Assemble the full application router
///
/// Every request passes through the request logger first, then panics inside
/// handlers are turned into a JSON 500 before reaching it on the way out.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(routes::INDEX, get(handlers::index_handler))
        .route(routes::HEALTH, get(handlers::health_handler))
        .route(
            routes::KV_ITEM,
            get(handlers::get_handler)
                .put(handlers::put_handler)
                .delete(handlers::delete_handler),
        )
        .route(routes::OPENAPI_JSON, get(api_doc::openapi_handler))
        .fallback(handlers::not_found_handler)
        .method_not_allowed_fallback(handlers::not_found_handler)
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(
            TraceLayer::new_for_http()
                .on_request(log_request)
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .with_state(state)
}

/// Bind `HOST:PORT` and record the port the listener actually holds
///
/// With `PORT=0` the OS picks the port, so `config.port` is rewritten before
/// anything reports it.
pub async fn bind_listener(config: &mut Config) -> Result<TcpListener> {
    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    let local_addr = listener
        .local_addr()
        .context("Failed to read the bound listener address")?;
    if config.port != local_addr.port() {
        tracing::info!(
            "Requested port {} resolved to {}",
            config.port,
            local_addr.port()
        );
        config.port = local_addr.port();
    }

    Ok(listener)
}

fn log_request(request: &Request<Body>, _span: &Span) {
    tracing::info!(
        method = %request.method(),
        url = %request_url(request),
        remote_addr = %remote_addr(request),
        "incoming request"
    );
}

/// Full URL of the request as the client addressed it
fn request_url<B>(request: &Request<B>) -> String {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok());

    match host {
        Some(host) => format!("http://{}{}", host, request.uri()),
        None => request.uri().to_string(),
    }
}

fn remote_addr<B>(request: &Request<B>) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use std::time::Instant;
    use tower::ServiceExt;

    #[test]
    fn test_request_url_with_host() {
        let request = Request::builder()
            .uri("/kv/color?x=1")
            .header("host", "localhost:14659")
            .body(())
            .unwrap();

        assert_eq!(request_url(&request), "http://localhost:14659/kv/color?x=1");
    }

    #[test]
    fn test_request_url_without_host() {
        let request = Request::builder().uri("/healthy").body(()).unwrap();
        assert_eq!(request_url(&request), "/healthy");
    }

    #[test]
    fn test_remote_addr() {
        let mut request = Request::builder().uri("/").body(()).unwrap();
        assert_eq!(remote_addr(&request), "unknown");

        let addr: SocketAddr = "10.1.2.3:5555".parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(addr));
        assert_eq!(remote_addr(&request), "10.1.2.3:5555");
    }

    #[tokio::test]
    async fn test_bind_listener_reports_assigned_port() {
        let mut config = Config {
            port: 0,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            debug: false,
        };

        let listener = bind_listener(&mut config).await.unwrap();
        let bound_port = listener.local_addr().unwrap().port();
        assert_ne!(config.port, 0);
        assert_eq!(config.port, bound_port);

        let app = build_router(AppState::new(config, Instant::now()));
        let response = app
            .oneshot(Request::builder().uri("/healthy").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["port"], bound_port);
    }

    #[tokio::test]
    async fn test_bind_listener_fails_on_taken_port() {
        let mut first = Config {
            port: 0,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            debug: false,
        };
        let _held = bind_listener(&mut first).await.unwrap();

        let mut second = first.clone();
        let result = bind_listener(&mut second).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to bind"));
    }

    #[tokio::test]
    async fn test_openapi_endpoint() {
        let config = Config {
            port: 3000,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            debug: false,
        };
        let app = build_router(AppState::new(config, Instant::now()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri(routes::OPENAPI_JSON)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(doc["info"]["title"], "rust-memory-kv API");
    }

    #[tokio::test]
    async fn test_panicking_handler_returns_json_500() {
        async fn boom() -> &'static str {
            panic!("handler exploded")
        }

        let app: Router = Router::new()
            .route("/boom", get(boom))
            .layer(CatchPanicLayer::custom(error::panic_response));

        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Internal server error"}));
        assert!(!json.to_string().contains("exploded"));
    }
}
