//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Audio Context: 音频片段与 WAV 编码
//! - Document Context: 文档、编辑事务与高亮绑定
//! - Voice Context: 音色与语气预设

pub mod audio;
pub mod document;
pub mod voice;
