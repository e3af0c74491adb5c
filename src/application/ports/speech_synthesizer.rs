//! Speech Synthesizer Port - 语音合成接口抽象
//!
//! 定义语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 合成错误
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("No audio data in response")]
    MissingAudio,
}

/// 合成请求
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub prompt: String,
    pub voice: String,
}

/// 合成响应
#[derive(Debug, Clone)]
pub struct SynthesisResponse {
    /// base64 编码的 16 位 PCM
    pub data: String,
    /// 例如 `audio/L16;codec=pcm;rate=24000`
    pub mime_type: String,
}

/// Speech Synthesizer Port
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, SynthesisError>;

    /// 检查合成服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
