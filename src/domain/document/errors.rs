//! Document Context - Errors

use thiserror::Error;

use super::TextPos;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("块不存在: {0}")]
    InvalidBlock(usize),

    #[error("无效的位置: {0}")]
    InvalidPosition(TextPos),

    #[error("无效的范围: {from} .. {to}")]
    InvalidRange { from: TextPos, to: TextPos },

    #[error("该操作不支持跨块范围: {from} .. {to}")]
    CrossBlockRange { from: TextPos, to: TextPos },
}
