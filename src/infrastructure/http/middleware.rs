//! HTTP Middleware
//!
//! 失败请求日志：业务错误（HTTP 200 + errno）与 HTTP 层错误（4xx/5xx，如未知路由、请求体过大）

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

use super::error::BusinessError;

pub async fn log_failed_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if let Some(business) = response.extensions().get::<BusinessError>() {
        if business.is_server_side() {
            tracing::error!(
                method = %method,
                uri = %uri,
                errno = business.errno,
                error = %business.message,
                elapsed_ms,
                "Request failed"
            );
        } else {
            tracing::warn!(
                method = %method,
                uri = %uri,
                errno = business.errno,
                error = %business.message,
                elapsed_ms,
                "Request rejected"
            );
        }
        return response;
    }

    let status = response.status();
    if status.is_server_error() {
        tracing::error!(method = %method, uri = %uri, status = status.as_u16(), elapsed_ms, "HTTP server error");
    } else if status.is_client_error() {
        tracing::warn!(method = %method, uri = %uri, status = status.as_u16(), elapsed_ms, "HTTP client error");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http::ApiError;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::{get, post},
        Router,
    };
    use tower::util::ServiceExt;

    async fn missing_clip() -> Result<&'static str, ApiError> {
        Err(ApiError::NotFound("Audio not found: k1".into()))
    }

    async fn synth_down() -> Result<&'static str, ApiError> {
        Err(ApiError::ServiceUnavailable("upstream timeout".into()))
    }

    async fn pong() -> &'static str {
        "pong"
    }

    fn router() -> Router {
        Router::new()
            .route("/api/ping", get(pong))
            .route("/api/audio/download/:audio_key", get(missing_clip))
            .route("/api/generate", post(synth_down))
            .layer(axum::middleware::from_fn(log_failed_requests))
    }

    async fn call(method: &str, uri: &str) -> Response {
        router()
            .oneshot(
                HttpRequest::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let response = call("GET", "/api/ping").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.extensions().get::<BusinessError>().is_none());
    }

    #[tokio::test]
    async fn test_business_error_keeps_http_ok() {
        let response = call("GET", "/api/audio/download/k1").await;
        assert_eq!(response.status(), StatusCode::OK);
        let business = response.extensions().get::<BusinessError>().unwrap();
        assert_eq!(business.errno, 404);
        assert!(!business.is_server_side());

        let response = call("POST", "/api/generate").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .extensions()
            .get::<BusinessError>()
            .unwrap()
            .is_server_side());
    }

    #[tokio::test]
    async fn test_unknown_route_is_plain_http_error() {
        let response = call("GET", "/api/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<BusinessError>().is_none());

        let response = call("GET", "/api/generate").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
