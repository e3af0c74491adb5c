//! Event Publisher Implementation
//!
//! WebSocket 事件推送实现

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::domain::audio::AudioKey;
use crate::domain::document::{EditOutcome, InvalidationReason};

/// 生成失败提示的自动消失时间
pub const ERROR_DISMISS_MS: u64 = 5000;

/// WebSocket 事件类型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum WsEvent {
    /// 文档已修改
    DocumentChanged {
        version: u64,
        corrected: bool,
    },
    /// 高亮失效
    HighlightInvalidated {
        audio_key: AudioKey,
        reason: InvalidationReason,
        version: u64,
    },
    /// 音频生成完成
    AudioGenerated {
        audio_key: AudioKey,
        voice: String,
        tone: String,
        version: u64,
    },
    /// 音频生成失败（提示在 dismiss_after_ms 后自动消失）
    GenerationFailed {
        message: String,
        dismiss_after_ms: u64,
    },
    /// 预置音频加载完成
    PresetsLoaded {
        loaded: usize,
        skipped: usize,
        failed: usize,
    },
}

/// 事件发布器
pub struct EventPublisher {
    channel: broadcast::Sender<WsEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(100);
        Self { channel: tx }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅事件
    pub fn subscribe(&self) -> broadcast::Receiver<WsEvent> {
        self.channel.subscribe()
    }

    /// 发布一次编辑的结果
    pub fn publish_edit(&self, outcome: &EditOutcome) {
        if !outcome.changed {
            return;
        }
        self.publish(WsEvent::DocumentChanged {
            version: outcome.version,
            corrected: outcome.corrected,
        });
        for invalidation in &outcome.invalidations {
            self.publish(WsEvent::HighlightInvalidated {
                audio_key: invalidation.audio_key.clone(),
                reason: invalidation.reason,
                version: outcome.version,
            });
        }
    }

    /// 发布音频生成完成事件
    pub fn publish_audio_generated(&self, audio_key: &AudioKey, voice: &str, tone: &str, version: u64) {
        self.publish(WsEvent::AudioGenerated {
            audio_key: audio_key.clone(),
            voice: voice.to_string(),
            tone: tone.to_string(),
            version,
        });
    }

    /// 发布音频生成失败事件
    pub fn publish_generation_failed(&self, message: &str) {
        self.publish(WsEvent::GenerationFailed {
            message: message.to_string(),
            dismiss_after_ms: ERROR_DISMISS_MS,
        });
    }

    /// 发布预置音频加载完成事件
    pub fn publish_presets_loaded(&self, loaded: usize, skipped: usize, failed: usize) {
        self.publish(WsEvent::PresetsLoaded {
            loaded,
            skipped,
            failed,
        });
    }

    fn publish(&self, event: WsEvent) {
        if let Err(e) = self.channel.send(event) {
            tracing::debug!(error = %e, "Failed to publish event (no receivers)");
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::Invalidation;

    #[tokio::test]
    async fn test_edit_publishes_change_and_invalidations() {
        let publisher = EventPublisher::new();
        let mut rx = publisher.subscribe();

        publisher.publish_edit(&EditOutcome {
            version: 3,
            changed: true,
            corrected: true,
            invalidations: vec![Invalidation {
                audio_key: AudioKey::new("k1").unwrap(),
                reason: InvalidationReason::Stale,
            }],
        });

        assert!(matches!(
            rx.recv().await.unwrap(),
            WsEvent::DocumentChanged { version: 3, corrected: true }
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            WsEvent::HighlightInvalidated { reason: InvalidationReason::Stale, .. }
        ));
    }

    #[test]
    fn test_failure_event_shape() {
        let event = WsEvent::GenerationFailed {
            message: "boom".to_string(),
            dismiss_after_ms: ERROR_DISMISS_MS,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "GenerationFailed");
        assert_eq!(json["data"]["dismiss_after_ms"], 5000);
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let publisher = EventPublisher::new();
        publisher.publish_generation_failed("nobody listening");
        publisher.publish_edit(&EditOutcome::default());
    }
}
