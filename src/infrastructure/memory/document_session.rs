//! In-Memory Document Session Implementation

use std::sync::{Arc, Mutex, MutexGuard};

use crate::application::ports::{
    AudioStorePort, DocumentPersistencePort, DocumentSessionPort, DocumentSnapshot,
    HoverMenuPort, PrepareEdit, SessionError,
};
use crate::domain::document::{EditOutcome, EditorState, Transaction};

/// 内存文档会话
pub struct InMemoryDocumentSession {
    state: Mutex<EditorState>,
    store: Arc<dyn AudioStorePort>,
    hover_menus: Arc<dyn HoverMenuPort>,
    persistence: Option<Arc<dyn DocumentPersistencePort>>,
}

impl InMemoryDocumentSession {
    pub fn new(
        state: EditorState,
        store: Arc<dyn AudioStorePort>,
        hover_menus: Arc<dyn HoverMenuPort>,
    ) -> Self {
        Self {
            state: Mutex::new(state),
            store,
            hover_menus,
            persistence: None,
        }
    }

    pub fn with_persistence(mut self, persistence: Arc<dyn DocumentPersistencePort>) -> Self {
        self.persistence = Some(persistence);
        self
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn lock(&self) -> MutexGuard<'_, EditorState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// 清理失效键：删除片段、关闭悬停菜单、保存文档
    fn settle(&self, state: &EditorState, outcome: &EditOutcome) {
        for key in outcome.released_keys() {
            self.store.remove(&key);
        }
        for invalidation in &outcome.invalidations {
            let closed = self.hover_menus.close_for_key(&invalidation.audio_key);
            tracing::info!(
                audio_key = %invalidation.audio_key,
                reason = ?invalidation.reason,
                closed_menus = closed,
                version = outcome.version,
                "Highlight invalidated"
            );
        }

        if let Some(persistence) = &self.persistence {
            if let Err(e) = persistence.save_document(state.document(), state.version()) {
                tracing::warn!(version = state.version(), error = %e, "Failed to persist document");
            }
        }
    }
}

impl DocumentSessionPort for InMemoryDocumentSession {
    fn snapshot(&self) -> DocumentSnapshot {
        let state = self.lock();
        DocumentSnapshot {
            document: state.document().clone(),
            version: state.version(),
        }
    }

    fn apply(&self, tx: &Transaction) -> Result<EditOutcome, SessionError> {
        self.apply_with(&mut |_| Ok(tx.clone()))
    }

    fn apply_with(&self, prepare: &mut PrepareEdit<'_>) -> Result<EditOutcome, SessionError> {
        let mut state = self.lock();
        let tx = prepare(state.document())?;
        let outcome = state.apply(&tx, |key| self.store.contains(key))?;

        if outcome.changed {
            self.settle(&state, &outcome);
            tracing::debug!(
                version = outcome.version,
                steps = tx.steps.len(),
                corrected = outcome.corrected,
                "Document edited"
            );
        }
        Ok(outcome)
    }
}
