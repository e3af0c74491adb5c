//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `VOICE_CURSOR_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `VOICE_CURSOR_SERVER__PORT=8080`
/// - `VOICE_CURSOR_SYNTH__API_KEY=...`
/// - `VOICE_CURSOR_PRESETS__BASE_URL=http://localhost:3000`
/// - `VOICE_CURSOR_STORAGE__DB_PATH=/data/voice-cursor.sled`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5060)?
        .set_default("server.static_files.enabled", false)?
        .set_default("server.static_files.dir", "web")?
        .set_default("synth.base_url", "https://generativelanguage.googleapis.com")?
        .set_default("synth.model", "gemini-2.0-flash-exp")?
        .set_default("synth.api_key", "")?
        .set_default("synth.timeout_secs", 60)?
        .set_default("storage.data_dir", "data")?
        .set_default("storage.db_path", "data/voice-cursor.sled")?
        .set_default("storage.persist_document", true)?
        .set_default("presets.enabled", true)?
        .set_default("presets.dir", "presets")?
        .set_default("presets.timeout_secs", 10)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: VOICE_CURSOR_
    // 层级分隔符: __ (双下划线)
    // 例如: VOICE_CURSOR_SYNTH__MODEL=gemini-2.0-flash-exp
    // 注意: 环境变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("VOICE_CURSOR")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    // 验证端口范围
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    // 验证合成服务
    if config.synth.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Synth base URL cannot be empty".to_string(),
        ));
    }
    if config.synth.model.is_empty() {
        return Err(ConfigError::ValidationError(
            "Synth model cannot be empty".to_string(),
        ));
    }

    // 验证数据库路径
    if config.storage.db_path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    // 验证预置音频来源
    if config.presets.enabled && config.presets.dir.is_none() && config.presets.base_url.is_none() {
        return Err(ConfigError::ValidationError(
            "Presets enabled but neither dir nor base_url is set".to_string(),
        ));
    }

    Ok(())
}

/// 隐藏敏感值
fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Public Base URL: {}", config.server.public_base_url());
    if config.server.static_files.enabled {
        tracing::info!("Static Files: {:?}", config.server.static_files.dir);
    }
    tracing::info!("Synth URL: {}", config.synth.base_url);
    tracing::info!("Synth Model: {}", config.synth.model);
    tracing::info!("Synth API Key: {}", redact(&config.synth.api_key));
    tracing::info!("Synth Timeout: {}s", config.synth.timeout_secs);
    tracing::info!("Data Directory: {:?}", config.storage.data_dir);
    tracing::info!("Database: {}", config.storage.db_path);
    tracing::info!("Persist Document: {}", config.storage.persist_document);
    tracing::info!("Presets Enabled: {}", config.presets.enabled);
    if config.presets.enabled {
        match (&config.presets.dir, &config.presets.base_url) {
            (Some(dir), _) => tracing::info!("Presets Dir: {:?}", dir),
            (None, Some(url)) => tracing::info!("Presets URL: {}", url),
            (None, None) => {}
        }
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5060);
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_synth_model() {
        let mut config = AppConfig::default();
        config.synth.model = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_db_path() {
        let mut config = AppConfig::default();
        config.storage.db_path = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_presets_need_a_source() {
        let mut config = AppConfig::default();
        config.presets.dir = None;
        assert!(validate_config(&config).is_err());

        config.presets.base_url = Some("http://localhost:3000".to_string());
        assert!(validate_config(&config).is_ok());

        config.presets.base_url = None;
        config.presets.enabled = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_redact() {
        assert_eq!(redact(""), "<unset>");
        assert_eq!(redact("secret"), "<redacted>");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[server]\nport = 8080\n\n[presets]\nbase_url = \"http://localhost:3000\"\n",
        )
        .unwrap();

        let config = load_config_from_path(Some(&path)).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.presets.base_url.as_deref(), Some("http://localhost:3000"));
        assert_eq!(config.synth.timeout_secs, 60);
    }
}
