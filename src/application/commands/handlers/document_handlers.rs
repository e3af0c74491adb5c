//! Document Command Handlers

use std::sync::Arc;

use crate::application::commands::document_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::DocumentSessionPort;
use crate::domain::document::{EditOutcome, Transaction};
use crate::infrastructure::events::EventPublisher;

/// EditDocument Handler - 执行编辑并推送失效结果
pub struct EditDocumentHandler {
    session: Arc<dyn DocumentSessionPort>,
    event_publisher: Arc<EventPublisher>,
}

impl EditDocumentHandler {
    pub fn new(session: Arc<dyn DocumentSessionPort>, event_publisher: Arc<EventPublisher>) -> Self {
        Self {
            session,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: EditDocumentCommand) -> Result<EditOutcome, ApplicationError> {
        if cmd.steps.is_empty() {
            return Err(ApplicationError::validation("No edit steps"));
        }

        let outcome = self.session.apply(&Transaction::new(cmd.steps))?;
        self.event_publisher.publish_edit(&outcome);

        if !outcome.invalidations.is_empty() {
            tracing::info!(
                version = outcome.version,
                invalidated = outcome.invalidations.len(),
                "Edit invalidated highlights"
            );
        }
        Ok(outcome)
    }
}
