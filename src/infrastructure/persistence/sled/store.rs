//! Sled-based Clip & Document Persistence

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sled::{Db, Tree};
use std::path::Path;
use std::sync::Arc;

use crate::application::ports::{
    ClipPersistencePort, DocumentPersistencePort, PersistenceError, StoredDocument,
};
use crate::domain::audio::{AudioClip, AudioKey};
use crate::domain::document::Document;

const CLIPS_TREE: &str = "clips";
const DOCUMENT_TREE: &str = "document";
const DOCUMENT_KEY: &str = "current";

/// Sled 存储配置
#[derive(Debug, Clone)]
pub struct SledStoreConfig {
    /// 数据库路径
    pub db_path: String,
}

impl Default for SledStoreConfig {
    fn default() -> Self {
        Self {
            db_path: "data/voice-cursor.sled".to_string(),
        }
    }
}

/// 片段条目
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClipEntry {
    mime_type: String,
    data: Vec<u8>,
    created_at: i64,
}

/// 文档条目
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DocumentEntry {
    version: u64,
    document: Document,
    saved_at: i64,
}

fn db_err(e: sled::Error) -> PersistenceError {
    PersistenceError::DatabaseError(e.to_string())
}

/// Sled 存储
pub struct SledStore {
    db: Db,
    clips: Tree,
    document: Tree,
}

impl SledStore {
    pub fn new(config: &SledStoreConfig) -> Result<Self, PersistenceError> {
        let db = sled::open(&config.db_path).map_err(db_err)?;
        let clips = db.open_tree(CLIPS_TREE).map_err(db_err)?;
        let document = db.open_tree(DOCUMENT_TREE).map_err(db_err)?;

        tracing::info!(
            db_path = %config.db_path,
            clips = clips.len(),
            "SledStore initialized"
        );

        Ok(Self {
            db,
            clips,
            document,
        })
    }

    /// 打开现有数据库
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let config = SledStoreConfig {
            db_path: path.as_ref().to_string_lossy().to_string(),
        };
        Self::new(&config)
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 刷新数据库
    pub fn flush(&self) -> Result<(), PersistenceError> {
        self.db.flush().map_err(db_err)?;
        Ok(())
    }
}

impl ClipPersistencePort for SledStore {
    fn save_clip(&self, key: &AudioKey, clip: &AudioClip) -> Result<(), PersistenceError> {
        let entry = ClipEntry {
            mime_type: clip.mime_type().to_string(),
            data: clip.data().to_vec(),
            created_at: Utc::now().timestamp(),
        };
        let bytes = bincode::serialize(&entry)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        self.clips.insert(key.as_str(), bytes).map_err(db_err)?;

        tracing::debug!(audio_key = %key, size_bytes = entry.data.len(), "Clip persisted");
        Ok(())
    }

    fn delete_clip(&self, key: &AudioKey) -> Result<(), PersistenceError> {
        self.clips.remove(key.as_str()).map_err(db_err)?;
        Ok(())
    }

    fn load_clips(&self) -> Result<Vec<(AudioKey, AudioClip)>, PersistenceError> {
        let mut clips = Vec::new();
        for item in self.clips.iter() {
            let (key, value) = item.map_err(db_err)?;
            let key = String::from_utf8(key.to_vec())
                .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
            let Ok(key) = AudioKey::new(key) else {
                continue;
            };
            match bincode::deserialize::<ClipEntry>(&value) {
                Ok(entry) => clips.push((key, AudioClip::new(entry.data, entry.mime_type))),
                Err(e) => {
                    tracing::warn!(audio_key = %key, error = %e, "Skipping unreadable clip entry");
                }
            }
        }
        Ok(clips)
    }
}

impl DocumentPersistencePort for SledStore {
    fn save_document(&self, document: &Document, version: u64) -> Result<(), PersistenceError> {
        let entry = DocumentEntry {
            version,
            document: document.clone(),
            saved_at: Utc::now().timestamp(),
        };
        let bytes = serde_json::to_vec(&entry)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        self.document.insert(DOCUMENT_KEY, bytes).map_err(db_err)?;
        Ok(())
    }

    fn load_document(&self) -> Result<Option<StoredDocument>, PersistenceError> {
        let Some(bytes) = self.document.get(DOCUMENT_KEY).map_err(db_err)? else {
            return Ok(None);
        };
        let entry: DocumentEntry = serde_json::from_slice(&bytes)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        Ok(Some(StoredDocument {
            document: entry.document,
            version: entry.version,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::default_document;
    use tempfile::tempdir;

    fn store(dir: &tempfile::TempDir) -> SledStore {
        SledStore::open(dir.path().join("test.sled")).unwrap()
    }

    #[test]
    fn test_clip_save_load_delete() {
        let dir = tempdir().unwrap();
        let store = store(&dir);
        let key = AudioKey::new("audio-1").unwrap();

        store.save_clip(&key, &AudioClip::wav(vec![1, 2, 3])).unwrap();
        let clips = store.load_clips().unwrap();
        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].0, key);
        assert_eq!(clips[0].1.data(), &[1, 2, 3]);
        assert_eq!(clips[0].1.mime_type(), "audio/wav");

        store.delete_clip(&key).unwrap();
        assert!(store.load_clips().unwrap().is_empty());
    }

    #[test]
    fn test_document_round_trip_keeps_version() {
        let dir = tempdir().unwrap();
        let store = store(&dir);
        assert!(store.load_document().unwrap().is_none());

        let doc = default_document();
        store.save_document(&doc, 7).unwrap();
        store.save_document(&doc, 8).unwrap();

        let stored = store.load_document().unwrap().unwrap();
        assert_eq!(stored.version, 8);
        assert_eq!(stored.document, doc);
    }
}
