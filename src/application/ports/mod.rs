//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_store;
mod document_session;
mod hover_menu;
mod persistence;
mod preset_source;
mod speech_synthesizer;

pub use audio_store::AudioStorePort;
pub use document_session::{DocumentSessionPort, DocumentSnapshot, PrepareEdit, SessionError};
pub use hover_menu::{CloseOutcome, HoverError, HoverMenu, HoverMenuPort};
pub use persistence::{
    ClipPersistencePort, DocumentPersistencePort, PersistenceError, StoredDocument,
};
pub use preset_source::{PresetError, PresetSourcePort};
pub use speech_synthesizer::{
    SpeechSynthesizerPort, SynthesisError, SynthesisRequest, SynthesisResponse,
};
