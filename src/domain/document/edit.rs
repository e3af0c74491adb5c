//! Document Context - 编辑步骤与事务
//!
//! 一个事务包含若干步骤，要么全部生效，要么文档保持原样。

use serde::{Deserialize, Serialize};

use super::model::{
    char_marks, marks_for_insert, normalize_inline, split_inline, Block, Document, Highlight,
    Mark, TextNode, TextPos,
};
use super::DocumentError;
use crate::domain::audio::AudioKey;

/// 编辑步骤
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditStep {
    /// 输入文本，继承光标左侧字符的标记
    InsertText { at: TextPos, text: String },
    DeleteRange { from: TextPos, to: TextPos },
    /// 替换块内文本，新文本沿用被替换首字符的标记
    ReplaceText { from: TextPos, to: TextPos, text: String },
    SplitBlock { at: TextPos },
    InsertBlock { index: usize, block: Block },
    RemoveBlock { index: usize },
    /// 粘贴带标记的文本片段
    PasteSlice { at: TextPos, nodes: Vec<TextNode> },
    /// 剪切并粘贴；dest 按剪切之后的文档解释
    MoveRange { from: TextPos, to: TextPos, dest: TextPos },
    AddHighlight { from: TextPos, to: TextPos, highlight: Highlight },
    RemoveHighlight { from: TextPos, to: TextPos },
    /// 去除整个文档中引用该键的高亮
    UnsetHighlight { audio_key: AudioKey },
}

/// 编辑事务
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub steps: Vec<EditStep>,
}

impl Transaction {
    pub fn new(steps: Vec<EditStep>) -> Self {
        Self { steps }
    }

    pub fn single(step: EditStep) -> Self {
        Self { steps: vec![step] }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// 在副本上依次执行所有步骤
    pub fn apply(&self, doc: &Document) -> Result<Document, DocumentError> {
        let mut next = doc.clone();
        for step in &self.steps {
            next.apply_step(step)?;
        }
        Ok(next)
    }
}

impl Document {
    pub fn apply_step(&mut self, step: &EditStep) -> Result<(), DocumentError> {
        match step {
            EditStep::InsertText { at, text } => self.insert_text(*at, text),
            EditStep::DeleteRange { from, to } => self.delete_range(*from, *to),
            EditStep::ReplaceText { from, to, text } => self.replace_text(*from, *to, text),
            EditStep::SplitBlock { at } => self.split_block(*at),
            EditStep::InsertBlock { index, block } => self.insert_block(*index, block.clone()),
            EditStep::RemoveBlock { index } => self.remove_block(*index),
            EditStep::PasteSlice { at, nodes } => self.paste_slice(*at, nodes.clone()),
            EditStep::MoveRange { from, to, dest } => self.move_range(*from, *to, *dest),
            EditStep::AddHighlight {
                from,
                to,
                highlight,
            } => self.add_highlight(*from, *to, highlight),
            EditStep::RemoveHighlight { from, to } => {
                self.map_marks(*from, *to, |marks| {
                    marks.retain(|m| !matches!(m, Mark::Highlight(_)))
                })
            }
            EditStep::UnsetHighlight { audio_key } => {
                self.unset_highlight(audio_key);
                Ok(())
            }
        }
    }

    /// 两个位置之间的文本，跨块时以换行连接
    pub fn text_between(&self, from: TextPos, to: TextPos) -> Result<String, DocumentError> {
        self.check_range(from, to)?;
        let mut parts = Vec::with_capacity(to.block - from.block + 1);
        for index in from.block..=to.block {
            let block = &self.content[index];
            let start = if index == from.block { from.offset } else { 0 };
            let end = if index == to.block {
                to.offset
            } else {
                block.len()
            };
            parts.push(block.text().chars().skip(start).take(end - start).collect::<String>());
        }
        Ok(parts.join("\n"))
    }

    fn check_pos(&self, pos: TextPos) -> Result<(), DocumentError> {
        let block = self
            .content
            .get(pos.block)
            .ok_or(DocumentError::InvalidBlock(pos.block))?;
        if pos.offset > block.len() {
            return Err(DocumentError::InvalidPosition(pos));
        }
        Ok(())
    }

    fn check_range(&self, from: TextPos, to: TextPos) -> Result<(), DocumentError> {
        self.check_pos(from)?;
        self.check_pos(to)?;
        if from > to {
            return Err(DocumentError::InvalidRange { from, to });
        }
        Ok(())
    }

    fn check_inline_range(&self, from: TextPos, to: TextPos) -> Result<(), DocumentError> {
        self.check_range(from, to)?;
        if from.block != to.block {
            return Err(DocumentError::CrossBlockRange { from, to });
        }
        Ok(())
    }

    fn splice_inline(&mut self, at: TextPos, nodes: Vec<TextNode>) {
        let content = self.content[at.block].content_mut();
        let (mut left, right) = split_inline(std::mem::take(content), at.offset);
        left.extend(nodes);
        left.extend(right);
        normalize_inline(&mut left);
        *content = left;
    }

    /// 取出块内一段文本节点
    fn cut_inline(&mut self, from: TextPos, to: TextPos) -> Vec<TextNode> {
        let content = self.content[from.block].content_mut();
        let (mut left, rest) = split_inline(std::mem::take(content), from.offset);
        let (cut, right) = split_inline(rest, to.offset - from.offset);
        left.extend(right);
        normalize_inline(&mut left);
        *content = left;
        cut
    }

    fn insert_text(&mut self, at: TextPos, text: &str) -> Result<(), DocumentError> {
        self.check_pos(at)?;
        let marks = marks_for_insert(self.content[at.block].content(), at.offset);
        self.splice_inline(at, vec![TextNode::with_marks(text, marks)]);
        Ok(())
    }

    fn delete_range(&mut self, from: TextPos, to: TextPos) -> Result<(), DocumentError> {
        self.check_range(from, to)?;
        if from.block == to.block {
            self.cut_inline(from, to);
            return Ok(());
        }

        let tail = {
            let last = self.content[to.block].content_mut();
            split_inline(std::mem::take(last), to.offset).1
        };
        let head = self.content[from.block].content_mut();
        let (mut left, _) = split_inline(std::mem::take(head), from.offset);
        left.extend(tail);
        normalize_inline(&mut left);
        *head = left;
        self.content.drain(from.block + 1..=to.block);
        Ok(())
    }

    fn replace_text(&mut self, from: TextPos, to: TextPos, text: &str) -> Result<(), DocumentError> {
        self.check_inline_range(from, to)?;
        let content = self.content[from.block].content();
        let marks = if from < to {
            char_marks(content, from.offset).unwrap_or_default()
        } else {
            marks_for_insert(content, from.offset)
        };
        self.cut_inline(from, to);
        self.splice_inline(from, vec![TextNode::with_marks(text, marks)]);
        Ok(())
    }

    fn split_block(&mut self, at: TextPos) -> Result<(), DocumentError> {
        self.check_pos(at)?;
        let content = self.content[at.block].content_mut();
        let (left, right) = split_inline(std::mem::take(content), at.offset);
        *content = left;
        self.content.insert(at.block + 1, Block::paragraph(right));
        Ok(())
    }

    fn insert_block(&mut self, index: usize, mut block: Block) -> Result<(), DocumentError> {
        if index > self.content.len() {
            return Err(DocumentError::InvalidBlock(index));
        }
        block.normalize();
        self.content.insert(index, block);
        Ok(())
    }

    fn remove_block(&mut self, index: usize) -> Result<(), DocumentError> {
        if index >= self.content.len() {
            return Err(DocumentError::InvalidBlock(index));
        }
        self.content.remove(index);
        Ok(())
    }

    fn paste_slice(&mut self, at: TextPos, nodes: Vec<TextNode>) -> Result<(), DocumentError> {
        self.check_pos(at)?;
        self.splice_inline(at, nodes);
        Ok(())
    }

    fn move_range(&mut self, from: TextPos, to: TextPos, dest: TextPos) -> Result<(), DocumentError> {
        self.check_inline_range(from, to)?;
        let slice = self.cut_inline(from, to);
        self.check_pos(dest)?;
        self.splice_inline(dest, slice);
        Ok(())
    }

    fn add_highlight(
        &mut self,
        from: TextPos,
        to: TextPos,
        highlight: &Highlight,
    ) -> Result<(), DocumentError> {
        self.map_marks(from, to, |marks| {
            marks.retain(|m| !matches!(m, Mark::Highlight(_)));
            marks.push(Mark::Highlight(highlight.clone()));
        })
    }

    fn unset_highlight(&mut self, key: &AudioKey) {
        for block in &mut self.content {
            for node in block.content_mut().iter_mut() {
                node.marks
                    .retain(|m| m.as_highlight().map_or(true, |h| &h.audio_key != key));
            }
            block.normalize();
        }
    }

    /// 对范围内每个文本节点的标记执行变换
    fn map_marks<F>(&mut self, from: TextPos, to: TextPos, f: F) -> Result<(), DocumentError>
    where
        F: Fn(&mut Vec<Mark>),
    {
        self.check_range(from, to)?;
        for index in from.block..=to.block {
            let block = &mut self.content[index];
            let start = if index == from.block { from.offset } else { 0 };
            let end = if index == to.block {
                to.offset
            } else {
                block.len()
            };
            let content = block.content_mut();
            let (mut left, rest) = split_inline(std::mem::take(content), start);
            let (mut middle, right) = split_inline(rest, end - start);
            middle.iter_mut().for_each(|node| f(&mut node.marks));
            left.append(&mut middle);
            left.extend(right);
            normalize_inline(&mut left);
            *content = left;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> AudioKey {
        AudioKey::new(s).unwrap()
    }

    fn highlight(k: &str) -> Highlight {
        Highlight {
            audio_key: key(k),
            tone: "Neutral".to_string(),
            tone_emoji: "💬".to_string(),
            color: "rgba(186, 64, 129, 0.2)".to_string(),
            voice: Some("Orus".to_string()),
            prompt: String::new(),
        }
    }

    fn doc(lines: &[&str]) -> Document {
        Document::new(
            lines
                .iter()
                .map(|line| Block::paragraph(vec![TextNode::plain(*line)]))
                .collect(),
        )
    }

    fn p(block: usize, offset: usize) -> TextPos {
        TextPos::new(block, offset)
    }

    #[test]
    fn test_insert_inherits_left_marks() {
        let mut d = doc(&["hello world"]);
        d.apply_step(&EditStep::AddHighlight {
            from: p(0, 0),
            to: p(0, 5),
            highlight: highlight("k1"),
        })
        .unwrap();

        d.apply_step(&EditStep::InsertText { at: p(0, 5), text: "!".into() })
            .unwrap();
        assert_eq!(d.content[0].content()[0].text, "hello!");

        d.apply_step(&EditStep::InsertText { at: p(0, 0), text: ">".into() })
            .unwrap();
        assert_eq!(d.content[0].content()[0].text, ">hello!");
        assert_eq!(d.content[0].text(), ">hello! world");
    }

    #[test]
    fn test_delete_across_blocks_joins() {
        let mut d = doc(&["first line", "middle", "last line"]);
        d.apply_step(&EditStep::DeleteRange { from: p(0, 5), to: p(2, 4) })
            .unwrap();
        assert_eq!(d.blocks().len(), 1);
        assert_eq!(d.content[0].text(), "first line");
    }

    #[test]
    fn test_text_between() {
        let d = doc(&["héllo wörld", "second"]);
        assert_eq!(d.text_between(p(0, 6), p(0, 11)).unwrap(), "wörld");
        assert_eq!(d.text_between(p(0, 6), p(1, 3)).unwrap(), "wörld\nsec");
        assert!(matches!(
            d.text_between(p(0, 3), p(0, 1)),
            Err(DocumentError::InvalidRange { .. })
        ));
        assert!(matches!(
            d.text_between(p(0, 0), p(0, 99)),
            Err(DocumentError::InvalidPosition(_))
        ));
    }

    #[test]
    fn test_replace_takes_marks_of_first_char() {
        let mut d = doc(&["hello world"]);
        d.apply_step(&EditStep::AddHighlight {
            from: p(0, 6),
            to: p(0, 11),
            highlight: highlight("k1"),
        })
        .unwrap();
        d.apply_step(&EditStep::ReplaceText {
            from: p(0, 6),
            to: p(0, 11),
            text: "there".into(),
        })
        .unwrap();
        let node = &d.content[0].content()[1];
        assert_eq!(node.text, "there");
        assert_eq!(node.highlight().unwrap().audio_key, key("k1"));
    }

    #[test]
    fn test_split_block_keeps_marks() {
        let mut d = doc(&["hello world"]);
        d.apply_step(&EditStep::AddHighlight {
            from: p(0, 0),
            to: p(0, 11),
            highlight: highlight("k1"),
        })
        .unwrap();
        d.apply_step(&EditStep::SplitBlock { at: p(0, 5) }).unwrap();
        assert_eq!(d.blocks().len(), 2);
        assert_eq!(d.content[1].text(), " world");
        assert!(d.content[1].content()[0].highlight().is_some());
    }

    #[test]
    fn test_move_range_resolves_dest_after_cut() {
        let mut d = doc(&["abc def ghi"]);
        d.apply_step(&EditStep::MoveRange { from: p(0, 0), to: p(0, 4), dest: p(0, 4) })
            .unwrap();
        assert_eq!(d.content[0].text(), "def abc ghi");
    }

    #[test]
    fn test_add_highlight_replaces_existing() {
        let mut d = doc(&["hello"]);
        d.apply_step(&EditStep::AddHighlight { from: p(0, 0), to: p(0, 5), highlight: highlight("k1") })
            .unwrap();
        d.apply_step(&EditStep::AddHighlight { from: p(0, 0), to: p(0, 5), highlight: highlight("k2") })
            .unwrap();
        let keys: Vec<_> = d.highlights().map(|(_, _, h)| h.audio_key.clone()).collect();
        assert_eq!(keys, vec![key("k2")]);
    }

    #[test]
    fn test_unset_highlight_only_touches_key() {
        let mut d = doc(&["one two"]);
        d.apply_step(&EditStep::AddHighlight { from: p(0, 0), to: p(0, 3), highlight: highlight("k1") })
            .unwrap();
        d.apply_step(&EditStep::AddHighlight { from: p(0, 4), to: p(0, 7), highlight: highlight("k2") })
            .unwrap();
        d.apply_step(&EditStep::UnsetHighlight { audio_key: key("k1") })
            .unwrap();
        let keys: Vec<_> = d.highlights().map(|(_, _, h)| h.audio_key.clone()).collect();
        assert_eq!(keys, vec![key("k2")]);
        assert_eq!(d.content[0].content()[0].text, "one ");
    }

    #[test]
    fn test_failed_transaction_leaves_document_untouched() {
        let d = doc(&["hello"]);
        let tx = Transaction::new(vec![
            EditStep::InsertText { at: p(0, 5), text: "!".into() },
            EditStep::RemoveBlock { index: 3 },
        ]);
        assert_eq!(tx.apply(&d), Err(DocumentError::InvalidBlock(3)));
        assert_eq!(d.content[0].text(), "hello");
    }

    #[test]
    fn test_cross_block_replace_rejected() {
        let mut d = doc(&["a", "b"]);
        let err = d
            .apply_step(&EditStep::ReplaceText { from: p(0, 0), to: p(1, 1), text: "x".into() })
            .unwrap_err();
        assert!(matches!(err, DocumentError::CrossBlockRange { .. }));
    }

    #[test]
    fn test_step_json_shape() {
        let step: EditStep = serde_json::from_str(
            r#"{"op":"insert_text","at":{"block":0,"offset":2},"text":"x"}"#,
        )
        .unwrap();
        assert_eq!(step, EditStep::InsertText { at: p(0, 2), text: "x".into() });
    }
}
