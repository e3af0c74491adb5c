//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use tokio::sync::watch;

use crate::application::{
    // Command handlers
    CloseAudioMenuHandler, EditDocumentHandler, GenerateVoiceHandler, OpenAudioMenuHandler,
    // Query handlers
    GetAudioHandler, GetDocumentHandler, GetPlaybackHandler, GetPromptHandler, ListTonesHandler,
    ListVoicesHandler, PreviewPromptHandler,
    // Ports
    AudioStorePort, DocumentSessionPort, HoverMenuPort, SpeechSynthesizerPort,
};
use crate::infrastructure::events::EventPublisher;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub session: Arc<dyn DocumentSessionPort>,
    pub store: Arc<dyn AudioStorePort>,
    pub hover_menus: Arc<dyn HoverMenuPort>,
    pub synthesizer: Arc<dyn SpeechSynthesizerPort>,
    pub event_publisher: Arc<EventPublisher>,
    /// 预置音频加载完成标志
    pub readiness: watch::Receiver<bool>,

    // ========== Command Handlers ==========
    pub edit_document_handler: EditDocumentHandler,
    pub generate_voice_handler: GenerateVoiceHandler,
    pub open_audio_menu_handler: OpenAudioMenuHandler,
    pub close_audio_menu_handler: CloseAudioMenuHandler,

    // ========== Query Handlers ==========
    pub get_document_handler: GetDocumentHandler,
    pub get_prompt_handler: GetPromptHandler,
    pub get_audio_handler: GetAudioHandler,
    pub get_playback_handler: GetPlaybackHandler,
    pub list_voices_handler: ListVoicesHandler,
    pub list_tones_handler: ListTonesHandler,
    pub preview_prompt_handler: PreviewPromptHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        session: Arc<dyn DocumentSessionPort>,
        store: Arc<dyn AudioStorePort>,
        hover_menus: Arc<dyn HoverMenuPort>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        event_publisher: Arc<EventPublisher>,
        readiness: watch::Receiver<bool>,
    ) -> Self {
        Self {
            // Ports
            session: session.clone(),
            store: store.clone(),
            hover_menus: hover_menus.clone(),
            synthesizer: synthesizer.clone(),
            event_publisher: event_publisher.clone(),
            readiness,

            // Command handlers
            edit_document_handler: EditDocumentHandler::new(
                session.clone(),
                event_publisher.clone(),
            ),
            generate_voice_handler: GenerateVoiceHandler::new(
                session.clone(),
                store.clone(),
                synthesizer.clone(),
                event_publisher.clone(),
            ),
            open_audio_menu_handler: OpenAudioMenuHandler::new(
                session.clone(),
                store.clone(),
                hover_menus.clone(),
            ),
            close_audio_menu_handler: CloseAudioMenuHandler::new(hover_menus.clone()),

            // Query handlers
            get_document_handler: GetDocumentHandler::new(session.clone()),
            get_prompt_handler: GetPromptHandler::new(session.clone()),
            get_audio_handler: GetAudioHandler::new(store.clone()),
            get_playback_handler: GetPlaybackHandler::new(store.clone(), hover_menus.clone()),
            list_voices_handler: ListVoicesHandler::new(),
            list_tones_handler: ListTonesHandler::new(),
            preview_prompt_handler: PreviewPromptHandler::new(),
        }
    }

    /// 预置音频是否已加载
    pub fn is_ready(&self) -> bool {
        *self.readiness.borrow()
    }
}
