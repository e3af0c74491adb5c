//! Voice / Tone HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{ListTones, ListVoices, PreviewPrompt, ToneResponse};
use crate::domain::voice::VoicePreset;
use crate::infrastructure::http::dto::{ApiResponse, PreviewPromptRequest, PromptResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出音色
pub async fn list_voices(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<VoicePreset>>>, ApiError> {
    let voices = state.list_voices_handler.handle(ListVoices).await?;
    Ok(Json(ApiResponse::success(voices)))
}

/// 列出语气
pub async fn list_tones(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ToneResponse>>>, ApiError> {
    let tones = state.list_tones_handler.handle(ListTones).await?;
    Ok(Json(ApiResponse::success(tones)))
}

/// 预览语气提示词
pub async fn preview_prompt(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PreviewPromptRequest>,
) -> Result<Json<ApiResponse<PromptResponse>>, ApiError> {
    let prompt = state
        .preview_prompt_handler
        .handle(PreviewPrompt {
            tone: req.tone,
            text: req.text,
        })
        .await?;
    Ok(Json(ApiResponse::success(PromptResponse { prompt })))
}
