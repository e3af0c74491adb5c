//! Preset Adapter - 预置音频来源实现

mod file_preset_source;
mod http_preset_source;

pub use file_preset_source::FilePresetSource;
pub use http_preset_source::HttpPresetSource;
