//! Document Query Handlers

use std::sync::Arc;

use crate::application::commands::handlers::NO_PROMPT;
use crate::application::error::ApplicationError;
use crate::application::ports::{DocumentSessionPort, DocumentSnapshot};
use crate::application::queries::{GetDocument, GetPrompt};

/// GetDocument Handler
pub struct GetDocumentHandler {
    session: Arc<dyn DocumentSessionPort>,
}

impl GetDocumentHandler {
    pub fn new(session: Arc<dyn DocumentSessionPort>) -> Self {
        Self { session }
    }

    pub async fn handle(&self, _query: GetDocument) -> Result<DocumentSnapshot, ApplicationError> {
        Ok(self.session.snapshot())
    }
}

/// GetPrompt Handler - 高亮的提示词，缺失时返回占位文本
pub struct GetPromptHandler {
    session: Arc<dyn DocumentSessionPort>,
}

impl GetPromptHandler {
    pub fn new(session: Arc<dyn DocumentSessionPort>) -> Self {
        Self { session }
    }

    pub async fn handle(&self, query: GetPrompt) -> Result<String, ApplicationError> {
        let snapshot = self.session.snapshot();
        let highlight = snapshot
            .document
            .find_highlight(&query.audio_key)
            .ok_or_else(|| ApplicationError::not_found("Highlight", query.audio_key.as_str()))?;

        if highlight.prompt.is_empty() {
            Ok(NO_PROMPT.to_string())
        } else {
            Ok(highlight.prompt.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::AudioKey;
    use crate::domain::document::{default_document, EditorState};
    use crate::infrastructure::memory::{
        InMemoryAudioStore, InMemoryDocumentSession, InMemoryHoverMenus,
    };

    fn session() -> Arc<InMemoryDocumentSession> {
        InMemoryDocumentSession::new(
            EditorState::new(default_document()),
            InMemoryAudioStore::new().arc(),
            InMemoryHoverMenus::new().arc(),
        )
        .arc()
    }

    #[tokio::test]
    async fn test_get_prompt() {
        let handler = GetPromptHandler::new(session());
        let prompt = handler
            .handle(GetPrompt {
                audio_key: AudioKey::new("orus-surfer").unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(prompt, "Say this like a chill surfer: \"Woah.. can everyone, just chill …\"");

        assert!(handler
            .handle(GetPrompt {
                audio_key: AudioKey::new("unknown").unwrap(),
            })
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_get_document() {
        let handler = GetDocumentHandler::new(session());
        let snapshot = handler.handle(GetDocument).await.unwrap();
        assert_eq!(snapshot.version, 0);
        assert_eq!(snapshot.document, default_document());
    }
}
