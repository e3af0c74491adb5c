//! Generate HTTP Handler

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::GenerateVoiceCommand;
use crate::infrastructure::http::dto::{ApiResponse, GenerateVoiceRequest, GenerateVoiceResult};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 为选区生成语音
///
/// 请求在合成完成后才返回；失败同时通过 WebSocket 推送 GenerationFailed
pub async fn generate_voice(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateVoiceRequest>,
) -> Result<Json<ApiResponse<GenerateVoiceResult>>, ApiError> {
    let cmd = GenerateVoiceCommand {
        from: req.from,
        to: req.to,
        voice: req.voice,
        tone: req.tone,
        prompt: req.prompt,
    };

    let result = state.generate_voice_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::success(result.into())))
}
