//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod document_handlers;
mod generate_handlers;
mod hover_handlers;
mod preset_handlers;

pub use document_handlers::*;
pub use generate_handlers::*;
pub use hover_handlers::*;
pub use preset_handlers::*;
