//! Voice Context - 音色与语气限界上下文
//!
//! 职责:
//! - 固定的合成音色预设（名称 + 高亮颜色）
//! - 固定的语气预设（名称 + emoji + 提示词变换）

mod preset;
mod tone;

pub use preset::{voice_color, VoicePreset, DEFAULT_VOICE_COLOR, VOICE_PRESETS};
pub use tone::Tone;
