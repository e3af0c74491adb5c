//! File Preset Source - 从本地目录读取预置音频
//!
//! 目录结构: {dir}/{audioKey}.wav

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{PresetError, PresetSourcePort};
use crate::domain::audio::AudioKey;

/// 文件系统预置音频来源
pub struct FilePresetSource {
    /// 预置音频目录
    dir: PathBuf,
}

impl FilePresetSource {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn preset_path(&self, key: &AudioKey) -> PathBuf {
        self.dir.join(format!("{}.wav", key))
    }
}

#[async_trait]
impl PresetSourcePort for FilePresetSource {
    async fn fetch(&self, key: &AudioKey) -> Result<Vec<u8>, PresetError> {
        let path = self.preset_path(key);
        fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => PresetError::NotFound(path.display().to_string()),
            _ => PresetError::IoError(format!("{}: {}", path.display(), e)),
        })
    }

    fn describe(&self) -> String {
        format!("dir:{}", self.dir.display())
    }
}
