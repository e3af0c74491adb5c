//! Document Session Port - 文档会话
//!
//! 持有唯一的编辑器状态。每次编辑（执行 + 对账 + 修正 + 清理片段）在同一把锁内完成，
//! 其他编辑不会看到处于失效中途的高亮。

use serde::Serialize;
use thiserror::Error;

use crate::domain::document::{Document, DocumentError, EditOutcome, Transaction};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Selection changed while generating")]
    SelectionChanged,
}

/// 文档快照
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSnapshot {
    pub document: Document,
    pub version: u64,
}

/// 在锁内根据当前文档构造事务；返回错误时文档保持不变
pub type PrepareEdit<'a> = dyn FnMut(&Document) -> Result<Transaction, SessionError> + 'a;

/// Document Session Port
pub trait DocumentSessionPort: Send + Sync {
    fn snapshot(&self) -> DocumentSnapshot;

    /// 执行事务
    fn apply(&self, tx: &Transaction) -> Result<EditOutcome, SessionError>;

    /// 在锁内构造并执行事务
    fn apply_with(&self, prepare: &mut PrepareEdit<'_>) -> Result<EditOutcome, SessionError>;
}
