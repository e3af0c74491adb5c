//! Hover Commands - 高亮悬停菜单命令

use crate::domain::audio::AudioKey;

/// 指针进入高亮
#[derive(Debug, Clone)]
pub struct OpenAudioMenuCommand {
    /// 前端高亮元素 id
    pub highlight_id: String,
    pub audio_key: AudioKey,
}

/// 指针离开高亮或菜单
#[derive(Debug, Clone)]
pub struct CloseAudioMenuCommand {
    pub menu_id: String,
    /// 指针移入的元素 id
    pub related_target: Option<String>,
}
