//! Fake Synth Client - 用于测试的合成客户端
//!
//! 不实际调用合成服务，按配置返回固定 PCM、缺失音频或错误

use async_trait::async_trait;
use base64::Engine;
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{
    SpeechSynthesizerPort, SynthesisError, SynthesisRequest, SynthesisResponse,
};

/// 返回行为
#[derive(Debug, Clone)]
pub enum FakeSynthBehavior {
    /// 返回给定 PCM（base64 编码后）与 MIME
    Audio { pcm: Vec<u8>, mime_type: String },
    /// 响应中没有音频
    MissingAudio,
    /// 返回非法 base64
    Garbage,
    /// 网络错误
    Fail(String),
}

/// Fake Synth Client 配置
#[derive(Debug, Clone)]
pub struct FakeSynthClientConfig {
    pub behavior: FakeSynthBehavior,
    /// 模拟延迟（毫秒）
    pub delay_ms: u64,
}

impl Default for FakeSynthClientConfig {
    fn default() -> Self {
        Self {
            behavior: FakeSynthBehavior::Audio {
                pcm: vec![0; 4800],
                mime_type: "audio/L16;codec=pcm;rate=24000".to_string(),
            },
            delay_ms: 0,
        }
    }
}

/// Fake Synth Client
pub struct FakeSynthClient {
    config: FakeSynthClientConfig,
    requests: Mutex<Vec<SynthesisRequest>>,
}

impl FakeSynthClient {
    pub fn new(config: FakeSynthClientConfig) -> Self {
        tracing::info!(behavior = ?config.behavior, "FakeSynthClient initialized");
        Self {
            config,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_behavior(behavior: FakeSynthBehavior) -> Self {
        Self::new(FakeSynthClientConfig {
            behavior,
            ..Default::default()
        })
    }

    /// 已收到的请求
    pub fn requests(&self) -> Vec<SynthesisRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl Default for FakeSynthClient {
    fn default() -> Self {
        Self::new(FakeSynthClientConfig::default())
    }
}

#[async_trait]
impl SpeechSynthesizerPort for FakeSynthClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, SynthesisError> {
        tracing::debug!(
            voice = %request.voice,
            prompt_len = request.prompt.len(),
            "FakeSynthClient: returning configured response"
        );
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        if self.config.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.delay_ms)).await;
        }

        match &self.config.behavior {
            FakeSynthBehavior::Audio { pcm, mime_type } => Ok(SynthesisResponse {
                data: base64::engine::general_purpose::STANDARD.encode(pcm),
                mime_type: mime_type.clone(),
            }),
            FakeSynthBehavior::MissingAudio => Err(SynthesisError::MissingAudio),
            FakeSynthBehavior::Garbage => Ok(SynthesisResponse {
                data: "not base64!!".to_string(),
                mime_type: "audio/L16;rate=24000".to_string(),
            }),
            FakeSynthBehavior::Fail(message) => Err(SynthesisError::NetworkError(message.clone())),
        }
    }
}
