//! Audio Handlers

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use std::sync::Arc;

use crate::application::{GetAudioQuery, GetAudioResponse, GetPlaybackQuery};
use crate::domain::audio::AudioKey;
use crate::infrastructure::http::dto::AudioKeyRequest;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

fn audio_response(result: GetAudioResponse, attachment: bool) -> Result<Response, ApiError> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(header::CONTENT_LENGTH, result.audio_data.len());
    if attachment {
        builder = builder.header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", result.filename),
        );
    }

    builder
        .body(Body::from(result.audio_data))
        .map_err(|e| ApiError::Internal(format!("Failed to build audio response: {}", e)))
}

/// 获取音频
pub async fn get_audio(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AudioKeyRequest>,
) -> Result<Response, ApiError> {
    let result = state
        .get_audio_handler
        .handle(GetAudioQuery {
            audio_key: req.audio_key,
        })
        .await?;
    audio_response(result, false)
}

/// 下载音频（附件 `audio-<key>.wav`）
pub async fn download_audio(
    State(state): State<Arc<AppState>>,
    Path(audio_key): Path<String>,
) -> Result<Response, ApiError> {
    let audio_key = AudioKey::new(audio_key).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let result = state
        .get_audio_handler
        .handle(GetAudioQuery { audio_key })
        .await?;
    audio_response(result, true)
}

/// 通过悬停菜单的临时令牌播放
pub async fn playback(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<Response, ApiError> {
    let result = state
        .get_playback_handler
        .handle(GetPlaybackQuery { token })
        .await?;
    audio_response(result, false)
}
