//! PCM → WAV 容器封装
//!
//! 合成接口返回的是裸 PCM（16 位有符号、小端、单声道），
//! 需要补上 44 字节的标准 WAV 头才能被播放器直接识别。

use super::WavError;

/// WAV 标准头长度
pub const WAV_HEADER_LEN: usize = 44;

/// MIME 参数缺失或无法解析时使用的采样率
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

pub const NUM_CHANNELS: u16 = 1;
pub const BITS_PER_SAMPLE: u16 = 16;

const BLOCK_ALIGN: u16 = NUM_CHANNELS * (BITS_PER_SAMPLE / 8);

/// 从 MIME 字符串中解析采样率
///
/// 形如 `audio/L16;rate=24000`。`rate` 参数按前导数字解析，
/// 缺失、无法解析或为 0 时回退到 [`DEFAULT_SAMPLE_RATE`]。
pub fn parse_sample_rate(mime_type: &str) -> u32 {
    mime_type
        .split(';')
        .filter_map(|param| {
            let (key, value) = param.split_once('=')?;
            (key.trim() == "rate").then(|| value.trim())
        })
        .last()
        .and_then(parse_leading_u32)
        .filter(|rate| *rate > 0)
        .unwrap_or(DEFAULT_SAMPLE_RATE)
}

fn parse_leading_u32(value: &str) -> Option<u32> {
    let value = value.strip_prefix('+').unwrap_or(value);
    let end = value
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    value[..end].parse().ok()
}

/// 将裸 PCM 封装为 WAV 文件
///
/// 输出 = 44 字节头 + 原样拷贝的 PCM 数据，长度恒为 `44 + pcm.len()`。
/// 纯函数，相同输入产出逐字节相同的结果。
pub fn encode_wav(pcm: &[u8], sample_rate: u32) -> Vec<u8> {
    let data_size = pcm.len() as u32;
    let byte_rate = sample_rate.saturating_mul(BLOCK_ALIGN as u32);

    let mut wav = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());

    // RIFF header
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&data_size.saturating_add(36).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    // fmt chunk
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    wav.extend_from_slice(&NUM_CHANNELS.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&BLOCK_ALIGN.to_le_bytes());
    wav.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data chunk
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());

    wav.extend_from_slice(pcm);
    wav
}

/// WAV 头信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavInfo {
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    /// data chunk 起始偏移
    pub data_start: usize,
    /// data chunk 声明的大小
    pub data_size: usize,
}

impl WavInfo {
    pub fn duration_ms(&self) -> u64 {
        if self.byte_rate == 0 {
            return 0;
        }
        self.data_size as u64 * 1000 / self.byte_rate as u64
    }
}

fn read_u16(data: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([data[pos], data[pos + 1]])
}

fn read_u32(data: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
}

/// 解析 WAV 文件头
///
/// 跳过未知 chunk，chunk 大小为奇数时按偶数字节对齐。
pub fn read_wav_header(data: &[u8]) -> Result<WavInfo, WavError> {
    if data.len() < WAV_HEADER_LEN {
        return Err(WavError::TooShort(data.len()));
    }
    if &data[0..4] != b"RIFF" {
        return Err(WavError::MissingRiff);
    }
    if &data[8..12] != b"WAVE" {
        return Err(WavError::MissingWave);
    }

    let mut pos = 12;
    let mut fmt: Option<WavInfo> = None;

    while pos + 8 <= data.len() {
        let chunk_id = &data[pos..pos + 4];
        let chunk_size = read_u32(data, pos + 4) as usize;
        let body = pos + 8;

        match chunk_id {
            b"fmt " => {
                if chunk_size < 16 || body + 16 > data.len() {
                    return Err(WavError::InvalidFmtChunk(chunk_size));
                }
                fmt = Some(WavInfo {
                    audio_format: read_u16(data, body),
                    channels: read_u16(data, body + 2),
                    sample_rate: read_u32(data, body + 4),
                    byte_rate: read_u32(data, body + 8),
                    block_align: read_u16(data, body + 12),
                    bits_per_sample: read_u16(data, body + 14),
                    data_start: 0,
                    data_size: 0,
                });
            }
            b"data" => {
                let mut info = fmt.ok_or(WavError::MissingFmt)?;
                info.data_start = body;
                info.data_size = chunk_size;
                return Ok(info);
            }
            _ => {}
        }

        pos = body + chunk_size + (chunk_size % 2);
    }

    match fmt {
        Some(_) => Err(WavError::MissingData),
        None => Err(WavError::MissingFmt),
    }
}
