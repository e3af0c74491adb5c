//! Hover Command Handlers

use std::sync::Arc;

use crate::application::commands::hover_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioStorePort, CloseOutcome, DocumentSessionPort, HoverMenu, HoverMenuPort,
};

/// 高亮没有提示词时展示的文本
pub const NO_PROMPT: &str = "No prompt available";

/// OpenAudioMenu Handler - 指针进入高亮
pub struct OpenAudioMenuHandler {
    session: Arc<dyn DocumentSessionPort>,
    store: Arc<dyn AudioStorePort>,
    hover_menus: Arc<dyn HoverMenuPort>,
}

impl OpenAudioMenuHandler {
    pub fn new(
        session: Arc<dyn DocumentSessionPort>,
        store: Arc<dyn AudioStorePort>,
        hover_menus: Arc<dyn HoverMenuPort>,
    ) -> Self {
        Self {
            session,
            store,
            hover_menus,
        }
    }

    /// 只有文档中仍有该键的高亮，且音频片段存活时才打开菜单
    pub async fn handle(&self, cmd: OpenAudioMenuCommand) -> Result<HoverMenu, ApplicationError> {
        let snapshot = self.session.snapshot();
        let highlight = snapshot
            .document
            .find_highlight(&cmd.audio_key)
            .ok_or_else(|| ApplicationError::not_found("Highlight", cmd.audio_key.as_str()))?;
        if !self.store.contains(&cmd.audio_key) {
            return Err(ApplicationError::not_found("Audio", cmd.audio_key.as_str()));
        }

        let prompt = if highlight.prompt.is_empty() {
            NO_PROMPT.to_string()
        } else {
            highlight.prompt.clone()
        };

        Ok(self.hover_menus.open(&cmd.highlight_id, &cmd.audio_key, prompt))
    }
}

/// CloseAudioMenu Handler - 指针离开
pub struct CloseAudioMenuHandler {
    hover_menus: Arc<dyn HoverMenuPort>,
}

impl CloseAudioMenuHandler {
    pub fn new(hover_menus: Arc<dyn HoverMenuPort>) -> Self {
        Self { hover_menus }
    }

    pub async fn handle(&self, cmd: CloseAudioMenuCommand) -> Result<CloseOutcome, ApplicationError> {
        Ok(self
            .hover_menus
            .close(&cmd.menu_id, cmd.related_target.as_deref())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::{AudioClip, AudioKey};
    use crate::application::ports::DocumentSessionPort;
    use crate::domain::document::{
        default_document, EditStep, EditorState, Highlight, TextPos, Transaction,
    };
    use crate::infrastructure::memory::{
        InMemoryAudioStore, InMemoryDocumentSession, InMemoryHoverMenus,
    };

    fn setup() -> (
        OpenAudioMenuHandler,
        CloseAudioMenuHandler,
        Arc<InMemoryAudioStore>,
        Arc<InMemoryDocumentSession>,
    ) {
        let store = InMemoryAudioStore::new().arc();
        let menus = InMemoryHoverMenus::new().arc();
        let session = InMemoryDocumentSession::new(
            EditorState::new(default_document()),
            store.clone(),
            menus.clone(),
        )
        .arc();
        (
            OpenAudioMenuHandler::new(session.clone(), store.clone(), menus.clone()),
            CloseAudioMenuHandler::new(menus),
            store,
            session,
        )
    }

    #[tokio::test]
    async fn test_open_menu_for_live_clip() {
        let (open, close, store, _) = setup();
        let key = AudioKey::new("kore-neutral").unwrap();
        store.put(key.clone(), AudioClip::wav(vec![0; 4]));

        let menu = open
            .handle(OpenAudioMenuCommand {
                highlight_id: "hl-kore".to_string(),
                audio_key: key,
            })
            .await
            .unwrap();
        assert_eq!(menu.download_filename, "audio-kore-neutral.wav");
        assert_eq!(menu.prompt, "Say: \"Oh hey Alex, what's going on?\"");

        let outcome = close
            .handle(CloseAudioMenuCommand {
                menu_id: menu.menu_id,
                related_target: None,
            })
            .await
            .unwrap();
        assert_eq!(outcome, CloseOutcome::Closed);
    }

    #[tokio::test]
    async fn test_open_without_clip_is_not_found() {
        let (open, _, _, _) = setup();
        let err = open
            .handle(OpenAudioMenuCommand {
                highlight_id: "hl-1".to_string(),
                audio_key: AudioKey::new("leda-fast").unwrap(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_live_clip_without_highlight_is_not_found() {
        let (open, _, store, _) = setup();
        let key = AudioKey::new("not-in-document").unwrap();
        store.put(key.clone(), AudioClip::wav(vec![0; 4]));

        let err = open
            .handle(OpenAudioMenuCommand {
                highlight_id: "hl-x".to_string(),
                audio_key: key,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_missing_prompt_placeholder() {
        let (open, _, store, session) = setup();
        let key = AudioKey::new("blank-prompt").unwrap();
        store.put(key.clone(), AudioClip::wav(vec![0; 4]));
        session
            .apply(&Transaction::single(EditStep::AddHighlight {
                from: TextPos::new(0, 0),
                to: TextPos::new(0, 2),
                highlight: Highlight {
                    audio_key: key.clone(),
                    tone: "Neutral".to_string(),
                    tone_emoji: "💬".to_string(),
                    color: String::new(),
                    voice: None,
                    prompt: String::new(),
                },
            }))
            .unwrap();

        let menu = open
            .handle(OpenAudioMenuCommand {
                highlight_id: "hl-x".to_string(),
                audio_key: key,
            })
            .await
            .unwrap();
        assert_eq!(menu.prompt, NO_PROMPT);
    }
}
