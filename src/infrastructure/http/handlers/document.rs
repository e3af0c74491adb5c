//! Document HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{DocumentSnapshot, EditDocumentCommand, GetDocument};
use crate::infrastructure::http::dto::{ApiResponse, EditDocumentRequest, EditDocumentResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 获取当前文档
pub async fn get_document(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<DocumentSnapshot>>, ApiError> {
    let snapshot = state.get_document_handler.handle(GetDocument).await?;
    Ok(Json(ApiResponse::success(snapshot)))
}

/// 执行编辑事务
pub async fn edit_document(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EditDocumentRequest>,
) -> Result<Json<ApiResponse<EditDocumentResponse>>, ApiError> {
    let outcome = state
        .edit_document_handler
        .handle(EditDocumentCommand { steps: req.steps })
        .await?;
    Ok(Json(ApiResponse::success(outcome.into())))
}
