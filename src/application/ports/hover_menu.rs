//! Hover Menu Port - 高亮悬停菜单
//!
//! 指针进入高亮时打开菜单（播放 / 下载 / 查看提示词），离开时关闭并回收临时播放令牌

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::domain::audio::AudioKey;

#[derive(Debug, Error)]
pub enum HoverError {
    #[error("Menu not found: {0}")]
    MenuNotFound(String),

    #[error("Playback token not found: {0}")]
    TokenNotFound(String),
}

/// 已打开的菜单
#[derive(Debug, Clone, Serialize)]
pub struct HoverMenu {
    pub menu_id: String,
    pub highlight_id: String,
    pub audio_key: AudioKey,
    /// 临时播放令牌，菜单关闭后失效
    pub playback_token: String,
    pub download_filename: String,
    pub prompt: String,
    pub opened_at: DateTime<Utc>,
}

/// 关闭请求的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseOutcome {
    Closed,
    /// 指针移入菜单本身或高亮，忽略
    Ignored,
}

/// Hover Menu Port
pub trait HoverMenuPort: Send + Sync {
    /// 打开菜单；同一个高亮元素已有菜单时直接返回已有菜单
    fn open(&self, highlight_id: &str, audio_key: &AudioKey, prompt: String) -> HoverMenu;

    /// 关闭菜单
    fn close(&self, menu_id: &str, related_target: Option<&str>) -> Result<CloseOutcome, HoverError>;

    /// 关闭某个键的所有菜单，返回关闭数量
    fn close_for_key(&self, audio_key: &AudioKey) -> usize;

    /// 通过播放令牌解析音频键
    fn resolve_playback(&self, token: &str) -> Result<AudioKey, HoverError>;

    fn open_menus(&self) -> Vec<HoverMenu>;
}
