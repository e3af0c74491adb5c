//! Audio Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WavError {
    #[error("WAV 数据过短: {0} 字节")]
    TooShort(usize),

    #[error("缺少 RIFF 头")]
    MissingRiff,

    #[error("缺少 WAVE 标识")]
    MissingWave,

    #[error("无效的 fmt chunk 大小: {0}")]
    InvalidFmtChunk(usize),

    #[error("缺少 fmt chunk")]
    MissingFmt,

    #[error("缺少 data chunk")]
    MissingData,
}
