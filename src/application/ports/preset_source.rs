//! Preset Source Port - 预置音频来源

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::AudioKey;

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("Preset not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid audio: {0}")]
    InvalidAudio(String),
}

/// 按音频键获取 `<audioKey>.wav`
#[async_trait]
pub trait PresetSourcePort: Send + Sync {
    async fn fetch(&self, key: &AudioKey) -> Result<Vec<u8>, PresetError>;

    /// 用于日志
    fn describe(&self) -> String;
}
