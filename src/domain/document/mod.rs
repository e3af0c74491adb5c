//! Document Context - 文档限界上下文
//!
//! 职责:
//! - 富文本文档树与编辑事务
//! - 高亮与音频片段之间的绑定，编辑后对账
//! - 默认演示文档

mod binding;
mod edit;
mod errors;
mod model;
mod state;
mod template;

pub use binding::{
    collect_runs, reconcile, text_digest, BindingIndex, BindingReport, BoundText, Invalidation,
    InvalidationReason, KeyRun,
};
pub use edit::{EditStep, Transaction};
pub use errors::DocumentError;
pub use model::{Block, Document, HeadingAttrs, Highlight, Mark, TextNode, TextPos};
pub use state::{EditOutcome, EditorState};
pub use template::{default_document, extract_audio_keys};
