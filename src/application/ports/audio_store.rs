//! Audio Store Port - 音频片段存储
//!
//! 进程内 AudioKey -> AudioClip 映射，由 main 创建并注入各处理器

use crate::domain::audio::{AudioClip, AudioKey};

/// Audio Store Port
///
/// 写操作同时写穿到持久化层（如已配置），持久化失败只记录日志
pub trait AudioStorePort: Send + Sync {
    /// 写入（同键覆盖）
    fn put(&self, key: AudioKey, clip: AudioClip);

    fn get(&self, key: &AudioKey) -> Option<AudioClip>;

    fn contains(&self, key: &AudioKey) -> bool;

    /// 删除，返回是否存在
    fn remove(&self, key: &AudioKey) -> bool;

    fn keys(&self) -> Vec<AudioKey>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 只保留 `keep` 中的片段，返回删除数量
    fn retain_only(&self, keep: &[AudioKey]) -> usize {
        self.keys()
            .into_iter()
            .filter(|key| !keep.contains(key))
            .filter(|key| self.remove(key))
            .count()
    }
}
