//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod document_commands;
mod generate_commands;
mod hover_commands;
mod preset_commands;

pub mod handlers;

pub use document_commands::*;
pub use generate_commands::*;
pub use hover_commands::*;
pub use preset_commands::*;
