//! In-Memory Audio Store Implementation

use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::{AudioStorePort, ClipPersistencePort};
use crate::domain::audio::{AudioClip, AudioKey};

/// 内存音频存储，可选写穿到持久化层
pub struct InMemoryAudioStore {
    clips: DashMap<AudioKey, AudioClip>,
    persistence: Option<Arc<dyn ClipPersistencePort>>,
}

impl InMemoryAudioStore {
    pub fn new() -> Self {
        Self {
            clips: DashMap::new(),
            persistence: None,
        }
    }

    pub fn with_persistence(persistence: Arc<dyn ClipPersistencePort>) -> Self {
        Self {
            clips: DashMap::new(),
            persistence: Some(persistence),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 从持久化层恢复，返回恢复数量
    pub fn restore(&self) -> usize {
        let Some(persistence) = &self.persistence else {
            return 0;
        };
        match persistence.load_clips() {
            Ok(clips) => {
                let count = clips.len();
                for (key, clip) in clips {
                    self.clips.insert(key, clip);
                }
                tracing::info!(count = count, "Audio clips restored");
                count
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to restore audio clips");
                0
            }
        }
    }
}

impl Default for InMemoryAudioStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioStorePort for InMemoryAudioStore {
    fn put(&self, key: AudioKey, clip: AudioClip) {
        if let Some(persistence) = &self.persistence {
            if let Err(e) = persistence.save_clip(&key, &clip) {
                tracing::warn!(audio_key = %key, error = %e, "Failed to persist audio clip");
            }
        }
        tracing::debug!(audio_key = %key, size_bytes = clip.size_bytes(), "Audio clip stored");
        self.clips.insert(key, clip);
    }

    fn get(&self, key: &AudioKey) -> Option<AudioClip> {
        self.clips.get(key).map(|c| c.clone())
    }

    fn contains(&self, key: &AudioKey) -> bool {
        self.clips.contains_key(key)
    }

    fn remove(&self, key: &AudioKey) -> bool {
        let removed = self.clips.remove(key).is_some();
        if removed {
            if let Some(persistence) = &self.persistence {
                if let Err(e) = persistence.delete_clip(key) {
                    tracing::warn!(audio_key = %key, error = %e, "Failed to delete persisted clip");
                }
            }
            tracing::debug!(audio_key = %key, "Audio clip removed");
        }
        removed
    }

    fn keys(&self) -> Vec<AudioKey> {
        let mut keys: Vec<AudioKey> = self.clips.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    fn len(&self) -> usize {
        self.clips.len()
    }
}
