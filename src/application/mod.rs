//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（AudioStore、DocumentSession、SpeechSynthesizer、PresetSource、HoverMenu 等）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    BootstrapPresetsCommand,
    CloseAudioMenuCommand,
    EditDocumentCommand,
    GenerateVoiceCommand,
    GenerateVoiceResponse,
    OpenAudioMenuCommand,
    PresetReport,
    // Handlers
    handlers::{
        BootstrapPresetsHandler, CloseAudioMenuHandler, EditDocumentHandler, GenerateVoiceHandler,
        OpenAudioMenuHandler, NO_PROMPT,
    },
};

pub use error::ApplicationError;

pub use ports::{
    AudioStorePort, ClipPersistencePort, CloseOutcome, DocumentPersistencePort,
    DocumentSessionPort, DocumentSnapshot, HoverError, HoverMenu, HoverMenuPort,
    PersistenceError, PresetError, PresetSourcePort, SessionError, SpeechSynthesizerPort,
    StoredDocument, SynthesisError, SynthesisRequest, SynthesisResponse,
};

pub use queries::{
    GetAudioQuery,
    GetAudioResponse,
    GetDocument,
    GetPlaybackQuery,
    GetPrompt,
    ListTones,
    ListVoices,
    PreviewPrompt,
    // Handlers
    handlers::{
        GetAudioHandler, GetDocumentHandler, GetPlaybackHandler, GetPromptHandler,
        ListTonesHandler, ListVoicesHandler, PreviewPromptHandler, ToneResponse,
    },
};
