//! Audio Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 生成音频统一使用的 MIME 类型
pub const WAV_MIME_TYPE: &str = "audio/wav";

/// 音频键 - 高亮与音频片段之间的绑定标识
///
/// 不变量:
/// - 不可为空
/// - 内容不透明，仅按相等性比较
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AudioKey(String);

impl AudioKey {
    /// 为新生成的音频分配键: `audio-<uuid>`
    pub fn generate() -> Self {
        Self(format!("audio-{}", Uuid::new_v4()))
    }

    pub fn new(key: impl Into<String>) -> Result<Self, &'static str> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err("音频键不能为空");
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 下载时使用的文件名
    pub fn download_filename(&self) -> String {
        format!("audio-{}.wav", self.0)
    }
}

impl TryFrom<String> for AudioKey {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AudioKey> for String {
    fn from(key: AudioKey) -> Self {
        key.0
    }
}

impl std::fmt::Display for AudioKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 音频片段 - WAV 字节 + MIME 类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    data: Vec<u8>,
    mime_type: String,
}

impl AudioClip {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }

    pub fn wav(data: Vec<u8>) -> Self {
        Self::new(data, WAV_MIME_TYPE)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
