//! Memory Layer - In-Memory State Management
//!
//! 实现 AudioStore、DocumentSession 和 HoverMenu 的内存状态

mod audio_store;
mod document_session;
mod hover_menus;

pub use audio_store::InMemoryAudioStore;
pub use document_session::InMemoryDocumentSession;
pub use hover_menus::InMemoryHoverMenus;
