//! Preset Commands - 预置音频加载命令

use serde::Serialize;

use crate::domain::audio::AudioKey;

/// 加载预置音频
#[derive(Debug, Clone)]
pub struct BootstrapPresetsCommand {
    pub keys: Vec<AudioKey>,
}

/// 加载结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct PresetReport {
    pub loaded: Vec<AudioKey>,
    /// 已在存储中（从持久化恢复）
    pub skipped: Vec<AudioKey>,
    pub failed: Vec<AudioKey>,
}
