//! Highlight HTTP Handlers - 提示词与悬停菜单

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::application::{CloseAudioMenuCommand, CloseOutcome, GetPrompt, OpenAudioMenuCommand};
use crate::infrastructure::http::dto::{
    ApiResponse, AudioKeyRequest, EnterHighlightRequest, HoverMenuResponse, LeaveHighlightRequest,
    PromptResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Serialize)]
pub struct LeaveHighlightResponse {
    pub outcome: CloseOutcome,
}

/// 获取高亮的提示词
pub async fn get_prompt(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AudioKeyRequest>,
) -> Result<Json<ApiResponse<PromptResponse>>, ApiError> {
    let prompt = state
        .get_prompt_handler
        .handle(GetPrompt {
            audio_key: req.audio_key,
        })
        .await?;
    Ok(Json(ApiResponse::success(PromptResponse { prompt })))
}

/// 指针进入高亮：打开悬停菜单
pub async fn enter_highlight(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EnterHighlightRequest>,
) -> Result<Json<ApiResponse<HoverMenuResponse>>, ApiError> {
    let menu = state
        .open_audio_menu_handler
        .handle(OpenAudioMenuCommand {
            highlight_id: req.highlight_id,
            audio_key: req.audio_key,
        })
        .await?;
    Ok(Json(ApiResponse::success(menu.into())))
}

/// 指针离开高亮或菜单
pub async fn leave_highlight(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LeaveHighlightRequest>,
) -> Result<Json<ApiResponse<LeaveHighlightResponse>>, ApiError> {
    let outcome = state
        .close_audio_menu_handler
        .handle(CloseAudioMenuCommand {
            menu_id: req.menu_id,
            related_target: req.related_target,
        })
        .await?;
    Ok(Json(ApiResponse::success(LeaveHighlightResponse { outcome })))
}
