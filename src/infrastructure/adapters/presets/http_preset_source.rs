//! HTTP Preset Source - 通过 HTTP 获取预置音频
//!
//! GET {base_url}/audio/{audioKey}.wav

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::application::ports::{PresetError, PresetSourcePort};
use crate::domain::audio::AudioKey;

/// HTTP 预置音频来源
pub struct HttpPresetSource {
    client: Client,
    base_url: String,
}

impl HttpPresetSource {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, PresetError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PresetError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn preset_url(&self, key: &AudioKey) -> String {
        format!("{}/audio/{}.wav", self.base_url.trim_end_matches('/'), key)
    }
}

#[async_trait]
impl PresetSourcePort for HttpPresetSource {
    async fn fetch(&self, key: &AudioKey) -> Result<Vec<u8>, PresetError> {
        let url = self.preset_url(key);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PresetError::NetworkError(format!("{}: {}", url, e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(PresetError::NotFound(url)),
            status if !status.is_success() => {
                return Err(PresetError::NetworkError(format!("{}: HTTP {}", url, status)))
            }
            _ => {}
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PresetError::NetworkError(format!("{}: {}", url, e)))?;
        Ok(bytes.to_vec())
    }

    fn describe(&self) -> String {
        format!("http:{}", self.base_url)
    }
}
