//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const NOT_FOUND: i32 = 404;
    pub const CONFLICT: i32 = 409;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const SERVICE_UNAVAILABLE: i32 = 503;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
    Conflict(String),
    ServiceUnavailable(String),
}

/// 挂在响应扩展上的业务错误，由日志中间件读取
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessError {
    pub errno: i32,
    pub message: String,
}

impl BusinessError {
    pub fn is_server_side(&self) -> bool {
        self.errno >= errno::INTERNAL_ERROR
    }
}

impl ApiError {
    pub fn errno(&self) -> i32 {
        match self {
            ApiError::NotFound(_) => errno::NOT_FOUND,
            ApiError::BadRequest(_) => errno::BAD_REQUEST,
            ApiError::Internal(_) => errno::INTERNAL_ERROR,
            ApiError::Conflict(_) => errno::CONFLICT,
            ApiError::ServiceUnavailable(_) => errno::SERVICE_UNAVAILABLE,
        }
    }

    fn into_message(self) -> String {
        match self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Internal(msg)
            | ApiError::Conflict(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }
}

/// 业务错误一律返回 HTTP 200，错误码放在 `errno`
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let errno = self.errno();
        let message = self.into_message();
        let mut response = (
            StatusCode::OK,
            Json(ErrorResponse::new(errno, message.clone())),
        )
            .into_response();
        response
            .extensions_mut()
            .insert(BusinessError { errno, message });
        response
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound { resource_type, id } => {
                ApiError::NotFound(format!("{} not found: {}", resource_type, id))
            }
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::InvalidState(msg) => ApiError::Conflict(msg),
            ApplicationError::ExternalServiceError(msg) => ApiError::ServiceUnavailable(msg),
            ApplicationError::StorageError(msg) => ApiError::Internal(msg),
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_business_error_envelope() {
        let (status, json) =
            body_json(ApplicationError::validation("Please select some text first").into()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["errno"], 400);
        assert_eq!(json["error"], "Please select some text first");
        assert!(json["data"].is_null());
    }

    #[test]
    fn test_response_carries_business_error() {
        let response = ApiError::ServiceUnavailable("quota exceeded".into()).into_response();
        let business = response.extensions().get::<BusinessError>().unwrap();
        assert_eq!(business.errno, 503);
        assert_eq!(business.message, "quota exceeded");
        assert!(business.is_server_side());

        let response = ApiError::Conflict("Selection changed".into()).into_response();
        assert!(!response
            .extensions()
            .get::<BusinessError>()
            .unwrap()
            .is_server_side());
    }

    #[tokio::test]
    async fn test_error_mapping() {
        let (_, json) = body_json(ApplicationError::not_found("Audio", "k1").into()).await;
        assert_eq!(json["errno"], 404);
        assert_eq!(json["error"], "Audio not found: k1");

        let (_, json) = body_json(ApplicationError::external("timeout").into()).await;
        assert_eq!(json["errno"], 503);

        let (_, json) = body_json(ApplicationError::invalid_state("Selection changed").into()).await;
        assert_eq!(json["errno"], 409);
    }
}
