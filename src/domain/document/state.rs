//! Document Context - 编辑器状态
//!
//! 文档 + 绑定快照 + 版本号。所有修改都经过 [`EditorState::apply`]，
//! 在同一步内完成对账与修正。

use serde::Serialize;

use super::binding::{reconcile, BindingIndex, Invalidation, InvalidationReason};
use super::edit::Transaction;
use super::model::Document;
use super::DocumentError;
use crate::domain::audio::AudioKey;

/// 一次编辑的结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditOutcome {
    pub version: u64,
    pub changed: bool,
    /// 是否追加了修正事务
    pub corrected: bool,
    pub invalidations: Vec<Invalidation>,
}

impl EditOutcome {
    /// 需要从存储中删除的键
    pub fn released_keys(&self) -> Vec<AudioKey> {
        self.invalidations
            .iter()
            .filter(|inv| inv.reason != InvalidationReason::Dangling)
            .map(|inv| inv.audio_key.clone())
            .collect()
    }

    /// 所有失效的键
    pub fn invalidated_keys(&self) -> Vec<AudioKey> {
        self.invalidations
            .iter()
            .map(|inv| inv.audio_key.clone())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct EditorState {
    document: Document,
    index: BindingIndex,
    version: u64,
}

impl EditorState {
    pub fn new(document: Document) -> Self {
        Self::with_version(document, 0)
    }

    pub fn with_version(document: Document, version: u64) -> Self {
        let index = BindingIndex::from_document(&document);
        Self {
            document,
            index,
            version,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn index(&self) -> &BindingIndex {
        &self.index
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// 执行事务并对账
    ///
    /// is_live 判断某个键当前是否有存活的音频片段
    pub fn apply<F>(&mut self, tx: &Transaction, is_live: F) -> Result<EditOutcome, DocumentError>
    where
        F: Fn(&AudioKey) -> bool,
    {
        let next = tx.apply(&self.document)?;
        if next == self.document {
            return Ok(EditOutcome {
                version: self.version,
                ..Default::default()
            });
        }

        let report = reconcile(&self.index, &next, is_live);
        let next = match &report.correction {
            Some(correction) => correction.apply(&next)?,
            None => next,
        };

        self.index = BindingIndex::from_document(&next);
        self.document = next;
        self.version += 1;

        Ok(EditOutcome {
            version: self.version,
            changed: true,
            corrected: report.correction.is_some(),
            invalidations: report.invalidations,
        })
    }
}
