//! Document Queries - 文档查询

use crate::domain::audio::AudioKey;

/// 获取当前文档
#[derive(Debug, Clone)]
pub struct GetDocument;

/// 获取高亮的提示词
#[derive(Debug, Clone)]
pub struct GetPrompt {
    pub audio_key: AudioKey,
}
