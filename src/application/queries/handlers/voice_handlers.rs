//! Voice Query Handlers

use serde::Serialize;

use crate::application::error::ApplicationError;
use crate::application::queries::{ListTones, ListVoices, PreviewPrompt};
use crate::domain::voice::{Tone, VoicePreset, VOICE_PRESETS};

// ============================================================================
// Response DTOs
// ============================================================================

/// 语气信息
#[derive(Debug, Clone, Serialize)]
pub struct ToneResponse {
    pub name: &'static str,
    pub emoji: &'static str,
}

impl From<Tone> for ToneResponse {
    fn from(tone: Tone) -> Self {
        Self {
            name: tone.name(),
            emoji: tone.emoji(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// ListVoices Handler
#[derive(Default)]
pub struct ListVoicesHandler;

impl ListVoicesHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, _query: ListVoices) -> Result<Vec<VoicePreset>, ApplicationError> {
        Ok(VOICE_PRESETS.to_vec())
    }
}

/// ListTones Handler
#[derive(Default)]
pub struct ListTonesHandler;

impl ListTonesHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, _query: ListTones) -> Result<Vec<ToneResponse>, ApplicationError> {
        Ok(Tone::ALL.into_iter().map(ToneResponse::from).collect())
    }
}

/// PreviewPrompt Handler
#[derive(Default)]
pub struct PreviewPromptHandler;

impl PreviewPromptHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, query: PreviewPrompt) -> Result<String, ApplicationError> {
        let tone = Tone::from_name(&query.tone)
            .ok_or_else(|| ApplicationError::validation(format!("Unknown tone: {}", query.tone)))?;
        Ok(tone.transform(&query.text))
    }
}
