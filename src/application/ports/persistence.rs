//! Persistence Ports - 音频片段与文档的持久化
//!
//! 具体实现使用 Sled

use thiserror::Error;

use crate::domain::audio::{AudioClip, AudioKey};
use crate::domain::document::Document;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// 片段持久化
pub trait ClipPersistencePort: Send + Sync {
    fn save_clip(&self, key: &AudioKey, clip: &AudioClip) -> Result<(), PersistenceError>;

    fn delete_clip(&self, key: &AudioKey) -> Result<(), PersistenceError>;

    /// 读取全部片段（启动时恢复）
    fn load_clips(&self) -> Result<Vec<(AudioKey, AudioClip)>, PersistenceError>;
}

/// 已保存的文档
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub document: Document,
    pub version: u64,
}

/// 文档持久化
pub trait DocumentPersistencePort: Send + Sync {
    fn save_document(&self, document: &Document, version: u64) -> Result<(), PersistenceError>;

    fn load_document(&self) -> Result<Option<StoredDocument>, PersistenceError>;
}
