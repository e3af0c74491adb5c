//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 语音合成服务配置
    #[serde(default)]
    pub synth: SynthConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 预置音频配置
    #[serde(default)]
    pub presets: PresetsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL
    /// 如果未设置，则使用 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default)]
    pub enabled: bool,

    /// 静态文件目录
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("web")
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5060
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            let host = if self.host == "0.0.0.0" {
                "localhost"
            } else {
                &self.host
            };
            format!("http://{}:{}", host, self.port)
        })
    }
}

/// 语音合成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct SynthConfig {
    /// 服务基础 URL
    #[serde(default = "default_synth_url")]
    pub base_url: String,

    /// 模型名称
    #[serde(default = "default_synth_model")]
    pub model: String,

    /// API Key
    #[serde(default)]
    pub api_key: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_synth_timeout")]
    pub timeout_secs: u64,
}

fn default_synth_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_synth_model() -> String {
    "gemini-2.0-flash-exp".to_string()
}

fn default_synth_timeout() -> u64 {
    60
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            base_url: default_synth_url(),
            model: default_synth_model(),
            api_key: String::new(),
            timeout_secs: default_synth_timeout(),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 数据目录
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Sled 数据库路径
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// 是否保存编辑后的文档
    #[serde(default = "default_persist_document")]
    pub persist_document: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_db_path() -> String {
    "data/voice-cursor.sled".to_string()
}

fn default_persist_document() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            db_path: default_db_path(),
            persist_document: default_persist_document(),
        }
    }
}

/// 预置音频配置
///
/// `dir` 优先于 `base_url`
#[derive(Debug, Clone, Deserialize)]
pub struct PresetsConfig {
    /// 是否在启动时加载预置音频
    #[serde(default = "default_presets_enabled")]
    pub enabled: bool,

    /// 本地目录，文件名为 `<audio_key>.wav`
    #[serde(default = "default_presets_dir")]
    pub dir: Option<PathBuf>,

    /// 远程地址，请求 `{base_url}/audio/<audio_key>.wav`
    #[serde(default)]
    pub base_url: Option<String>,

    /// 远程请求超时（秒）
    #[serde(default = "default_presets_timeout")]
    pub timeout_secs: u64,
}

fn default_presets_enabled() -> bool {
    true
}

fn default_presets_dir() -> Option<PathBuf> {
    Some(PathBuf::from("presets"))
}

fn default_presets_timeout() -> u64 {
    10
}

impl Default for PresetsConfig {
    fn default() -> Self {
        Self {
            enabled: default_presets_enabled(),
            dir: default_presets_dir(),
            base_url: None,
            timeout_secs: default_presets_timeout(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5060);
        assert_eq!(config.synth.model, "gemini-2.0-flash-exp");
        assert_eq!(config.storage.db_path, "data/voice-cursor.sled");
        assert!(config.presets.enabled);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5060");
        assert_eq!(config.public_base_url(), "http://localhost:5060");
    }
}
