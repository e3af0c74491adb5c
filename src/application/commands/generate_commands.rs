//! Generate Commands - 语音生成命令

use crate::domain::audio::AudioKey;
use crate::domain::document::TextPos;

/// 为选区生成语音
#[derive(Debug, Clone)]
pub struct GenerateVoiceCommand {
    pub from: TextPos,
    pub to: TextPos,
    pub voice: String,
    pub tone: String,
    /// 覆盖语气生成的提示词
    pub prompt: Option<String>,
}

/// 生成结果
#[derive(Debug, Clone)]
pub struct GenerateVoiceResponse {
    pub audio_key: AudioKey,
    pub prompt: String,
    pub version: u64,
    pub size_bytes: usize,
    pub duration_ms: u64,
}
