//! Preset Command Handlers

use std::sync::Arc;
use tokio::sync::watch;

use crate::application::commands::preset_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioStorePort, DocumentSessionPort, PresetError, PresetSourcePort,
};
use crate::domain::audio::{read_wav_header, AudioClip, AudioKey};
use crate::domain::document::{Document, Transaction};
use crate::infrastructure::events::EventPublisher;

/// BootstrapPresets Handler - 启动时把默认文档引用的预置音频写入存储
///
/// 单个键失败只记录日志并跳过；完成后置位就绪标志。
/// 写入在会话锁内进行，加载期间被删除的高亮不会留下孤立片段。
pub struct BootstrapPresetsHandler {
    session: Arc<dyn DocumentSessionPort>,
    store: Arc<dyn AudioStorePort>,
    source: Arc<dyn PresetSourcePort>,
    event_publisher: Arc<EventPublisher>,
    ready: watch::Sender<bool>,
}

impl BootstrapPresetsHandler {
    pub fn new(
        session: Arc<dyn DocumentSessionPort>,
        store: Arc<dyn AudioStorePort>,
        source: Arc<dyn PresetSourcePort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        let (ready, _) = watch::channel(false);
        Self {
            session,
            store,
            source,
            event_publisher,
            ready,
        }
    }

    /// 就绪标志
    pub fn readiness(&self) -> watch::Receiver<bool> {
        self.ready.subscribe()
    }

    async fn fetch_valid(&self, key: &AudioKey) -> Result<Vec<u8>, PresetError> {
        let bytes = self.source.fetch(key).await?;
        read_wav_header(&bytes).map_err(|e| PresetError::InvalidAudio(e.to_string()))?;
        Ok(bytes)
    }

    /// 文档仍引用该键时写入，返回是否写入
    fn store_if_referenced(&self, key: &AudioKey, clip: AudioClip) -> Result<bool, ApplicationError> {
        let mut pending = Some(clip);
        let mut stored = false;
        self.session.apply_with(&mut |doc: &Document| {
            if doc.find_highlight(key).is_some() {
                if let Some(clip) = pending.take() {
                    self.store.put(key.clone(), clip);
                    stored = true;
                }
            }
            Ok(Transaction::default())
        })?;
        Ok(stored)
    }

    pub async fn handle(&self, cmd: BootstrapPresetsCommand) -> Result<PresetReport, ApplicationError> {
        let mut report = PresetReport::default();

        for key in cmd.keys {
            if self.store.contains(&key) {
                report.skipped.push(key);
                continue;
            }
            match self.fetch_valid(&key).await {
                Ok(bytes) => {
                    let size_bytes = bytes.len();
                    match self.store_if_referenced(&key, AudioClip::wav(bytes)) {
                        Ok(true) => {
                            tracing::debug!(audio_key = %key, size_bytes, "Preset loaded");
                            report.loaded.push(key);
                        }
                        Ok(false) => {
                            tracing::debug!(audio_key = %key, "Highlight removed before preset arrived");
                            report.skipped.push(key);
                        }
                        Err(e) => {
                            tracing::warn!(audio_key = %key, error = %e, "Failed to store preset audio");
                            report.failed.push(key);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        audio_key = %key,
                        source = %self.source.describe(),
                        error = %e,
                        "Failed to load preset audio"
                    );
                    report.failed.push(key);
                }
            }
        }

        self.ready.send_replace(true);
        self.event_publisher.publish_presets_loaded(
            report.loaded.len(),
            report.skipped.len(),
            report.failed.len(),
        );

        tracing::info!(
            loaded = report.loaded.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Preset bootstrap finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::encode_wav;
    use crate::domain::document::{Block, EditorState, Highlight, TextNode};
    use crate::infrastructure::memory::{
        InMemoryAudioStore, InMemoryDocumentSession, InMemoryHoverMenus,
    };
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MapSource {
        files: HashMap<String, Vec<u8>>,
    }

    #[async_trait]
    impl PresetSourcePort for MapSource {
        async fn fetch(&self, key: &AudioKey) -> Result<Vec<u8>, PresetError> {
            self.files
                .get(key.as_str())
                .cloned()
                .ok_or_else(|| PresetError::NotFound(key.to_string()))
        }

        fn describe(&self) -> String {
            "map".to_string()
        }
    }

    fn key(s: &str) -> AudioKey {
        AudioKey::new(s).unwrap()
    }

    /// 每个键一段高亮
    fn document_with(keys: &[&str]) -> Document {
        Document::new(
            keys.iter()
                .map(|k| {
                    Block::paragraph(vec![TextNode::highlighted(
                        format!("line {}", k),
                        Highlight {
                            audio_key: key(k),
                            tone: "Neutral".to_string(),
                            tone_emoji: "💬".to_string(),
                            color: String::new(),
                            voice: Some("Orus".to_string()),
                            prompt: String::new(),
                        },
                    )])
                })
                .collect(),
        )
    }

    fn setup(
        keys: &[&str],
        files: HashMap<String, Vec<u8>>,
    ) -> (
        BootstrapPresetsHandler,
        Arc<InMemoryAudioStore>,
        Arc<InMemoryDocumentSession>,
    ) {
        let store = InMemoryAudioStore::new().arc();
        let session = InMemoryDocumentSession::new(
            EditorState::new(document_with(keys)),
            store.clone(),
            InMemoryHoverMenus::new().arc(),
        )
        .arc();
        let handler = BootstrapPresetsHandler::new(
            session.clone(),
            store.clone(),
            Arc::new(MapSource { files }),
            EventPublisher::new().arc(),
        );
        (handler, store, session)
    }

    #[tokio::test]
    async fn test_bootstrap_loads_skips_and_reports_failures() {
        let (handler, store, session) = setup(
            &["good", "junk", "missing", "restored"],
            HashMap::from([
                ("good".to_string(), encode_wav(&[0; 8], 24000)),
                ("junk".to_string(), b"not a wav".to_vec()),
            ]),
        );
        store.put(key("restored"), AudioClip::wav(encode_wav(&[0; 4], 24000)));
        let readiness = handler.readiness();
        assert!(!*readiness.borrow());

        let report = handler
            .handle(BootstrapPresetsCommand {
                keys: vec![key("good"), key("junk"), key("missing"), key("restored")],
            })
            .await
            .unwrap();

        assert_eq!(report.loaded, vec![key("good")]);
        assert_eq!(report.skipped, vec![key("restored")]);
        assert_eq!(report.failed, vec![key("junk"), key("missing")]);
        assert!(store.contains(&key("good")));
        assert!(!store.contains(&key("junk")));
        assert_eq!(store.get(&key("good")).unwrap().mime_type(), "audio/wav");
        assert_eq!(session.snapshot().version, 0);
        assert!(*readiness.borrow());
    }

    #[tokio::test]
    async fn test_preset_for_removed_highlight_is_not_stored() {
        let (handler, store, _) = setup(
            &["kept"],
            HashMap::from([
                ("kept".to_string(), encode_wav(&[0; 8], 24000)),
                ("deleted".to_string(), encode_wav(&[0; 8], 24000)),
            ]),
        );

        let report = handler
            .handle(BootstrapPresetsCommand {
                keys: vec![key("kept"), key("deleted")],
            })
            .await
            .unwrap();

        assert_eq!(report.loaded, vec![key("kept")]);
        assert_eq!(report.skipped, vec![key("deleted")]);
        assert!(!store.contains(&key("deleted")));
        assert_eq!(store.keys(), vec![key("kept")]);
        assert!(*handler.readiness().borrow());
    }
}
