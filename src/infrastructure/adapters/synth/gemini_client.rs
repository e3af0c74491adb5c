//! Gemini Client - 调用 Gemini generateContent 合成语音
//!
//! 实现 SpeechSynthesizerPort trait
//!
//! 外部 API:
//! POST {base_url}/v1beta/models/{model}:generateContent?key={api_key}
//! Request: {"contents":[{"parts":[{"text":"..."}]}],"generationConfig":{"response_modalities":["AUDIO"],...}}
//! Response: candidates[0].content.parts[0].inlineData.{data, mimeType}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::{
    SpeechSynthesizerPort, SynthesisError, SynthesisRequest, SynthesisResponse,
};
use crate::domain::audio::WAV_MIME_TYPE;

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    data: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
    speech_config: SpeechConfig,
}

#[derive(Debug, Serialize)]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateContentRequest {
    fn new(request: &SynthesisRequest) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(request.prompt.clone()),
                    inline_data: None,
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["AUDIO"],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: request.voice.clone(),
                        },
                    },
                },
            },
        }
    }
}

/// 从响应中取出音频；只看第一个候选的第一个 part
fn extract_audio(response: GenerateContentResponse) -> Result<SynthesisResponse, SynthesisError> {
    let inline = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.inline_data)
        .ok_or(SynthesisError::MissingAudio)?;

    let data = inline
        .data
        .filter(|d| !d.is_empty())
        .ok_or(SynthesisError::MissingAudio)?;

    Ok(SynthesisResponse {
        data,
        mime_type: inline
            .mime_type
            .unwrap_or_else(|| WAV_MIME_TYPE.to_string()),
    })
}

// ============================================================================
// Client
// ============================================================================

/// Gemini 客户端配置
#[derive(Debug, Clone)]
pub struct GeminiClientConfig {
    /// API 基础 URL
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for GeminiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.0-flash-exp".to_string(),
            api_key: String::new(),
            timeout_secs: 60,
        }
    }
}

impl GeminiClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Gemini 客户端
pub struct GeminiClient {
    client: Client,
    config: GeminiClientConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiClientConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SynthesisError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取合成 URL（不含 key）
    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl SpeechSynthesizerPort for GeminiClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, SynthesisError> {
        let body = GenerateContentRequest::new(&request);

        tracing::debug!(
            url = %self.generate_url(),
            voice = %request.voice,
            prompt_len = request.prompt.len(),
            "Sending synthesis request"
        );

        let response = self
            .client
            .post(self.generate_url())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynthesisError::Timeout
                } else if e.is_connect() {
                    SynthesisError::NetworkError(format!("Cannot connect to synthesis service: {}", e))
                } else {
                    SynthesisError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SynthesisError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(e.to_string()))?;
        let audio = extract_audio(payload)?;

        tracing::info!(
            voice = %request.voice,
            mime_type = %audio.mime_type,
            data_len = audio.data.len(),
            "Synthesis completed"
        );

        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = GeminiClientConfig::new("http://example.com", "secret")
            .with_model("m1")
            .with_timeout(5);
        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.model, "m1");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_generate_url() {
        let client =
            GeminiClient::new(GeminiClientConfig::new("http://example.com/", "secret")).unwrap();
        assert_eq!(
            client.generate_url(),
            "http://example.com/v1beta/models/gemini-2.0-flash-exp:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentRequest::new(&SynthesisRequest {
            prompt: "Say: \"hi\"".to_string(),
            voice: "Kore".to_string(),
        });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Say: \"hi\"");
        assert_eq!(json["generationConfig"]["response_modalities"][0], "AUDIO");
        assert_eq!(
            json["generationConfig"]["speech_config"]["voice_config"]["prebuilt_voice_config"]
                ["voice_name"],
            "Kore"
        );
    }

    #[test]
    fn test_extract_audio() {
        let payload: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{"data":"AAAA","mimeType":"audio/L16;codec=pcm;rate=24000"}}]}}]}"#,
        )
        .unwrap();
        let audio = extract_audio(payload).unwrap();
        assert_eq!(audio.data, "AAAA");
        assert_eq!(audio.mime_type, "audio/L16;codec=pcm;rate=24000");
    }

    #[test]
    fn test_missing_mime_defaults_to_wav() {
        let payload: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{"data":"AAAA"}}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_audio(payload).unwrap().mime_type, "audio/wav");
    }

    #[test]
    fn test_missing_audio_is_error() {
        for body in [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{"content":{"parts":[{"text":"sorry"}]}}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"audio/wav"}}]}}]}"#,
        ] {
            let payload: GenerateContentResponse = serde_json::from_str(body).unwrap();
            assert!(matches!(extract_audio(payload), Err(SynthesisError::MissingAudio)), "{}", body);
        }
    }
}
