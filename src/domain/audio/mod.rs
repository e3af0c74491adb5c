//! Audio Context - 音频限界上下文
//!
//! 职责:
//! - AudioKey / AudioClip 值对象
//! - PCM → WAV 容器封装
//! - WAV 头解析（预置音频校验）

mod clip;
mod errors;
mod wav;

pub use clip::{AudioClip, AudioKey, WAV_MIME_TYPE};
pub use errors::WavError;
pub use wav::{
    encode_wav, parse_sample_rate, read_wav_header, WavInfo, BITS_PER_SAMPLE,
    DEFAULT_SAMPLE_RATE, NUM_CHANNELS, WAV_HEADER_LEN,
};
