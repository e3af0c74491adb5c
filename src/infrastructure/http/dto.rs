//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{GenerateVoiceResponse, HoverMenu};
use crate::domain::audio::AudioKey;
use crate::domain::document::{EditOutcome, EditStep, Invalidation, TextPos};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 空数据响应
#[derive(Debug, Serialize)]
pub struct Empty {}

impl ApiResponse<Empty> {
    /// 成功但无数据
    pub fn ok() -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(Empty {}),
        }
    }
}

// ============================================================================
// Document DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct EditDocumentRequest {
    pub steps: Vec<EditStep>,
}

#[derive(Debug, Serialize)]
pub struct EditDocumentResponse {
    pub version: u64,
    pub changed: bool,
    pub corrected: bool,
    pub invalidations: Vec<Invalidation>,
}

impl From<EditOutcome> for EditDocumentResponse {
    fn from(outcome: EditOutcome) -> Self {
        Self {
            version: outcome.version,
            changed: outcome.changed,
            corrected: outcome.corrected,
            invalidations: outcome.invalidations,
        }
    }
}

// ============================================================================
// Generate DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateVoiceRequest {
    pub from: TextPos,
    pub to: TextPos,
    pub voice: String,
    pub tone: String,
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateVoiceResult {
    pub audio_key: AudioKey,
    pub prompt: String,
    pub version: u64,
    pub size_bytes: usize,
    pub duration_ms: u64,
}

impl From<GenerateVoiceResponse> for GenerateVoiceResult {
    fn from(response: GenerateVoiceResponse) -> Self {
        Self {
            audio_key: response.audio_key,
            prompt: response.prompt,
            version: response.version,
            size_bytes: response.size_bytes,
            duration_ms: response.duration_ms,
        }
    }
}

// ============================================================================
// Tone DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PreviewPromptRequest {
    pub tone: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub prompt: String,
}

// ============================================================================
// Highlight DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AudioKeyRequest {
    pub audio_key: AudioKey,
}

#[derive(Debug, Deserialize)]
pub struct EnterHighlightRequest {
    pub highlight_id: String,
    pub audio_key: AudioKey,
}

#[derive(Debug, Deserialize)]
pub struct LeaveHighlightRequest {
    pub menu_id: String,
    #[serde(default)]
    pub related_target: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HoverMenuResponse {
    pub menu_id: String,
    pub highlight_id: String,
    pub audio_key: AudioKey,
    /// `/api/playback/{token}`
    pub playback_url: String,
    pub download_url: String,
    pub download_filename: String,
    pub prompt: String,
    pub opened_at: String,
}

impl From<HoverMenu> for HoverMenuResponse {
    fn from(menu: HoverMenu) -> Self {
        Self {
            playback_url: format!("/api/playback/{}", menu.playback_token),
            download_url: format!("/api/audio/download/{}", menu.audio_key),
            menu_id: menu.menu_id,
            highlight_id: menu.highlight_id,
            audio_key: menu.audio_key,
            download_filename: menu.download_filename,
            prompt: menu.prompt,
            opened_at: menu.opened_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_request_from_editor_json() {
        let req: EditDocumentRequest = serde_json::from_str(
            r#"{"steps":[{"op":"insert_text","at":{"block":0,"offset":3},"text":"hey"}]}"#,
        )
        .unwrap();
        assert_eq!(req.steps.len(), 1);
    }

    #[test]
    fn test_generate_request_prompt_optional() {
        let req: GenerateVoiceRequest = serde_json::from_str(
            r#"{"from":{"block":1,"offset":0},"to":{"block":1,"offset":5},"voice":"Kore","tone":"Happy"}"#,
        )
        .unwrap();
        assert!(req.prompt.is_none());
        assert_eq!(req.to, TextPos::new(1, 5));
    }

    #[test]
    fn test_blank_audio_key_rejected() {
        assert!(serde_json::from_str::<AudioKeyRequest>(r#"{"audio_key":"  "}"#).is_err());
    }
}
