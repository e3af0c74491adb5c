//! Generate Command Handlers

use base64::Engine;
use std::sync::Arc;

use crate::application::commands::generate_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioStorePort, DocumentSessionPort, SessionError, SpeechSynthesizerPort, SynthesisRequest,
};
use crate::domain::audio::{encode_wav, parse_sample_rate, read_wav_header, AudioClip, AudioKey};
use crate::domain::document::{EditStep, Highlight, Transaction};
use crate::domain::voice::{Tone, VoicePreset};
use crate::infrastructure::events::EventPublisher;

/// GenerateVoice Handler - 选区 -> 合成 -> WAV -> 存储 -> 高亮
///
/// 网络请求在锁外等待；提交时若选区文本已变化，丢弃结果
pub struct GenerateVoiceHandler {
    session: Arc<dyn DocumentSessionPort>,
    store: Arc<dyn AudioStorePort>,
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    event_publisher: Arc<EventPublisher>,
}

impl GenerateVoiceHandler {
    pub fn new(
        session: Arc<dyn DocumentSessionPort>,
        store: Arc<dyn AudioStorePort>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            session,
            store,
            synthesizer,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateVoiceCommand,
    ) -> Result<GenerateVoiceResponse, ApplicationError> {
        match self.generate(cmd).await {
            Ok(response) => Ok(response),
            Err(e) => {
                tracing::warn!(error = %e, "Voice generation failed");
                self.event_publisher.publish_generation_failed(&e.to_string());
                Err(e)
            }
        }
    }

    async fn generate(
        &self,
        cmd: GenerateVoiceCommand,
    ) -> Result<GenerateVoiceResponse, ApplicationError> {
        let voice = VoicePreset::find(&cmd.voice)
            .ok_or_else(|| ApplicationError::validation(format!("Unknown voice: {}", cmd.voice)))?;
        let tone = Tone::from_name(&cmd.tone)
            .ok_or_else(|| ApplicationError::validation(format!("Unknown tone: {}", cmd.tone)))?;

        let snapshot = self.session.snapshot();
        let text = snapshot.document.text_between(cmd.from, cmd.to)?;
        if text.is_empty() {
            return Err(ApplicationError::validation("Please select some text first"));
        }

        let prompt = cmd
            .prompt
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| tone.transform(&text));

        tracing::info!(
            voice = %voice.name,
            tone = %tone,
            text_len = text.len(),
            version = snapshot.version,
            "Generating voice"
        );

        let response = self
            .synthesizer
            .synthesize(SynthesisRequest {
                prompt: prompt.clone(),
                voice: voice.name.to_string(),
            })
            .await?;

        let pcm = base64::engine::general_purpose::STANDARD
            .decode(response.data.as_bytes())
            .map_err(|e| ApplicationError::external(format!("Invalid audio data: {}", e)))?;
        let wav = encode_wav(&pcm, parse_sample_rate(&response.mime_type));
        let duration_ms = read_wav_header(&wav)
            .map(|info| info.duration_ms())
            .unwrap_or_default();
        let size_bytes = wav.len();

        let audio_key = AudioKey::generate();
        let highlight = Highlight {
            audio_key: audio_key.clone(),
            tone: tone.name().to_string(),
            tone_emoji: tone.emoji().to_string(),
            color: voice.color.to_string(),
            voice: Some(voice.name.to_string()),
            prompt: prompt.clone(),
        };
        let tx = Transaction::new(vec![
            EditStep::RemoveHighlight {
                from: cmd.from,
                to: cmd.to,
            },
            EditStep::AddHighlight {
                from: cmd.from,
                to: cmd.to,
                highlight,
            },
        ]);

        let mut pending = Some(AudioClip::wav(wav));
        let result = self.session.apply_with(&mut |doc| {
            if doc.text_between(cmd.from, cmd.to)? != text {
                return Err(SessionError::SelectionChanged);
            }
            if let Some(clip) = pending.take() {
                self.store.put(audio_key.clone(), clip);
            }
            Ok(tx.clone())
        });

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                self.store.remove(&audio_key);
                return Err(e.into());
            }
        };

        self.event_publisher.publish_edit(&outcome);
        self.event_publisher
            .publish_audio_generated(&audio_key, voice.name, tone.name(), outcome.version);

        tracing::info!(
            audio_key = %audio_key,
            size_bytes = size_bytes,
            duration_ms = duration_ms,
            version = outcome.version,
            "Voice generated"
        );

        Ok(GenerateVoiceResponse {
            audio_key,
            prompt,
            version: outcome.version,
            size_bytes,
            duration_ms,
        })
    }
}
