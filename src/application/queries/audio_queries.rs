//! Audio Queries - 音频查询

use crate::domain::audio::AudioKey;

/// 获取音频查询
#[derive(Debug, Clone)]
pub struct GetAudioQuery {
    pub audio_key: AudioKey,
}

/// 通过临时播放令牌获取音频
#[derive(Debug, Clone)]
pub struct GetPlaybackQuery {
    pub token: String,
}

/// 获取音频响应
#[derive(Debug, Clone)]
pub struct GetAudioResponse {
    pub audio_key: AudioKey,
    pub audio_data: Vec<u8>,
    pub content_type: String,
    pub filename: String,
}
