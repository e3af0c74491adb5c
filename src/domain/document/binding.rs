//! Document Context - 高亮与音频的绑定跟踪
//!
//! 每个音频键记录一份生成时的文本摘要。每次编辑之后重新扫描文档:
//! - 文本变化（stale）的高亮被去除，音频片段被删除
//! - 从文档中消失（orphaned）的键，音频片段被删除
//! - 新出现且没有存活片段（dangling）的键，高亮被去除
//!
//! 跨块的高亮按 `text_between` 的方式以 `\n` 连接成一段。
//! 同一个键可以出现在多个互不相邻的片段上（复制粘贴），只要每个片段的文本都与记录一致即视为有效。

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::edit::{EditStep, Transaction};
use super::model::{Document, TextPos};
use crate::domain::audio::AudioKey;

/// 高亮失效原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidationReason {
    /// 高亮文本被修改
    Stale,
    /// 高亮整体被删除
    Orphaned,
    /// 高亮引用的音频片段不存在
    Dangling,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invalidation {
    pub audio_key: AudioKey,
    pub reason: InvalidationReason,
}

/// 键在文档中连续的一段文本，可以跨越多个块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRun {
    pub start: TextPos,
    pub end: TextPos,
    pub text: String,
}

/// 绑定记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundText {
    pub digest: String,
    pub len: usize,
    pub position: TextPos,
}

impl BoundText {
    fn from_run(run: &KeyRun) -> Self {
        Self {
            digest: text_digest(&run.text),
            len: run.text.chars().count(),
            position: run.start,
        }
    }

    fn matches(&self, text: &str) -> bool {
        self.digest == text_digest(text)
    }
}

pub fn text_digest(text: &str) -> String {
    format!("{:x}", md5::compute(text.as_bytes()))
}

/// 按文档顺序收集每个键的连续片段
pub fn collect_runs(doc: &Document) -> Vec<(AudioKey, Vec<KeyRun>)> {
    let mut order: Vec<(AudioKey, Vec<KeyRun>)> = Vec::new();
    let mut slots: HashMap<AudioKey, usize> = HashMap::new();
    let block_lens: Vec<usize> = doc.blocks().iter().map(|b| b.len()).collect();

    for (pos, node) in doc.text_nodes() {
        let Some(highlight) = node.highlight() else {
            continue;
        };
        let key = &highlight.audio_key;
        let end = TextPos::new(pos.block, pos.offset + node.len());

        let slot = match slots.get(key) {
            Some(&slot) => slot,
            None => {
                order.push((key.clone(), Vec::new()));
                slots.insert(key.clone(), order.len() - 1);
                order.len() - 1
            }
        };
        let runs = &mut order[slot].1;
        match runs.last_mut() {
            Some(run) if run.end == pos => {
                run.text.push_str(&node.text);
                run.end = end;
            }
            Some(run) if crosses_blocks(&block_lens, run.end, pos) => {
                for _ in run.end.block..pos.block {
                    run.text.push('\n');
                }
                run.text.push_str(&node.text);
                run.end = end;
            }
            _ => runs.push(KeyRun {
                start: pos,
                end,
                text: node.text.clone(),
            }),
        }
    }

    order
}

/// `end` 位于块尾，`start` 位于后续块首，且中间只有空块
fn crosses_blocks(block_lens: &[usize], end: TextPos, start: TextPos) -> bool {
    start.offset == 0
        && start.block > end.block
        && block_lens.get(end.block) == Some(&end.offset)
        && block_lens[end.block + 1..start.block].iter().all(|&len| len == 0)
}

/// 编辑前的绑定快照
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingIndex {
    entries: HashMap<AudioKey, BoundText>,
}

impl BindingIndex {
    pub fn from_document(doc: &Document) -> Self {
        let entries = collect_runs(doc)
            .into_iter()
            .filter_map(|(key, runs)| runs.first().map(|run| (key, BoundText::from_run(run))))
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &AudioKey) -> Option<&BoundText> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &AudioKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &AudioKey> {
        self.entries.keys()
    }
}

/// 一次对账的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingReport {
    pub invalidations: Vec<Invalidation>,
    /// 去除 stale / dangling 高亮的修正事务
    pub correction: Option<Transaction>,
}

impl BindingReport {
    /// 需要删除音频片段的键
    pub fn released_keys(&self) -> impl Iterator<Item = &AudioKey> {
        self.invalidations
            .iter()
            .filter(|inv| inv.reason != InvalidationReason::Dangling)
            .map(|inv| &inv.audio_key)
    }
}

/// 将编辑后的文档与编辑前的快照对账
pub fn reconcile<F>(before: &BindingIndex, after: &Document, is_live: F) -> BindingReport
where
    F: Fn(&AudioKey) -> bool,
{
    let mut invalidations = Vec::new();
    let mut unset = Vec::new();
    let mut seen: HashSet<&AudioKey> = HashSet::new();

    let runs = collect_runs(after);
    for (key, key_runs) in &runs {
        match before.get(key) {
            Some(bound) => {
                seen.insert(key);
                if key_runs.iter().any(|run| !bound.matches(&run.text)) {
                    invalidations.push(Invalidation {
                        audio_key: key.clone(),
                        reason: InvalidationReason::Stale,
                    });
                    unset.push(key.clone());
                }
            }
            None if !is_live(key) => {
                invalidations.push(Invalidation {
                    audio_key: key.clone(),
                    reason: InvalidationReason::Dangling,
                });
                unset.push(key.clone());
            }
            None => {}
        }
    }

    let mut orphaned: Vec<(&AudioKey, &BoundText)> = before
        .entries
        .iter()
        .filter(|(key, _)| !seen.contains(key))
        .collect();
    orphaned.sort_by_key(|(key, bound)| (bound.position, (*key).clone()));
    invalidations.extend(orphaned.into_iter().map(|(key, _)| Invalidation {
        audio_key: key.clone(),
        reason: InvalidationReason::Orphaned,
    }));

    let correction = (!unset.is_empty()).then(|| {
        Transaction::new(
            unset
                .into_iter()
                .map(|audio_key| EditStep::UnsetHighlight { audio_key })
                .collect(),
        )
    });

    BindingReport {
        invalidations,
        correction,
    }
}
