//! Document Context - 文档树
//!
//! 序列化格式与编辑器 JSON 保持一致:
//! `{"type":"doc","content":[{"type":"paragraph","content":[{"type":"text","text":"..","marks":[..]}]}]}`

use serde::{Deserialize, Serialize};

use crate::domain::audio::AudioKey;

/// 文本位置：块索引 + 块内字符偏移（按 Unicode 标量计数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TextPos {
    pub block: usize,
    pub offset: usize,
}

impl TextPos {
    pub fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }
}

impl std::fmt::Display for TextPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.block, self.offset)
    }
}

/// 高亮标注
///
/// 不变量:
/// - audio_key 指向一个存活的音频片段，或者整个标注被移除
/// - prompt 是请求音频时使用的原始提示词
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub audio_key: AudioKey,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub tone_emoji: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(default)]
    pub prompt: String,
}

/// 行内标记
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "attrs", rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Code,
    Highlight(Highlight),
}

impl Mark {
    fn rank(&self) -> u8 {
        match self {
            Mark::Bold => 0,
            Mark::Italic => 1,
            Mark::Code => 2,
            Mark::Highlight(_) => 3,
        }
    }

    pub fn as_highlight(&self) -> Option<&Highlight> {
        match self {
            Mark::Highlight(h) => Some(h),
            _ => None,
        }
    }
}

/// 每种标记最多一个，按固定顺序排列，便于相邻节点合并
pub(crate) fn canonicalize_marks(marks: &mut Vec<Mark>) {
    marks.sort_by_key(Mark::rank);
    marks.dedup_by_key(|m| m.rank());
}

/// 文本节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "text")]
pub struct TextNode {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

impl TextNode {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn with_marks(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }

    pub fn highlighted(text: impl Into<String>, highlight: Highlight) -> Self {
        Self::with_marks(text, vec![Mark::Highlight(highlight)])
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.marks.iter().find_map(Mark::as_highlight)
    }

    /// 字符数
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    pub level: u8,
}

/// 块节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Paragraph {
        #[serde(default)]
        content: Vec<TextNode>,
    },
    Heading {
        attrs: HeadingAttrs,
        #[serde(default)]
        content: Vec<TextNode>,
    },
}

impl Block {
    pub fn paragraph(content: Vec<TextNode>) -> Self {
        let mut block = Block::Paragraph { content };
        block.normalize();
        block
    }

    pub fn heading(level: u8, content: Vec<TextNode>) -> Self {
        let mut block = Block::Heading {
            attrs: HeadingAttrs { level },
            content,
        };
        block.normalize();
        block
    }

    pub fn content(&self) -> &[TextNode] {
        match self {
            Block::Paragraph { content } | Block::Heading { content, .. } => content,
        }
    }

    pub(crate) fn content_mut(&mut self) -> &mut Vec<TextNode> {
        match self {
            Block::Paragraph { content } | Block::Heading { content, .. } => content,
        }
    }

    pub fn text(&self) -> String {
        self.content().iter().map(|n| n.text.as_str()).collect()
    }

    /// 字符数
    pub fn len(&self) -> usize {
        self.content().iter().map(TextNode::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.content().iter().all(TextNode::is_empty)
    }

    pub(crate) fn normalize(&mut self) {
        normalize_inline(self.content_mut());
    }
}

/// 文档根节点
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "doc")]
pub struct Document {
    #[serde(default)]
    pub content: Vec<Block>,
}

impl Document {
    pub fn new(content: Vec<Block>) -> Self {
        let mut doc = Self { content };
        doc.content.iter_mut().for_each(Block::normalize);
        doc
    }

    pub fn blocks(&self) -> &[Block] {
        &self.content
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.content.get(index)
    }

    /// 按文档顺序遍历所有文本节点及其起始位置
    pub fn text_nodes(&self) -> impl Iterator<Item = (TextPos, &TextNode)> + '_ {
        self.content.iter().enumerate().flat_map(|(block, b)| {
            let mut offset = 0;
            b.content().iter().map(move |node| {
                let pos = TextPos::new(block, offset);
                offset += node.len();
                (pos, node)
            })
        })
    }

    /// 遍历所有高亮
    pub fn highlights(&self) -> impl Iterator<Item = (TextPos, &TextNode, &Highlight)> + '_ {
        self.text_nodes()
            .filter_map(|(pos, node)| node.highlight().map(|h| (pos, node, h)))
    }

    /// 查找某个音频键对应的高亮
    pub fn find_highlight(&self, key: &AudioKey) -> Option<&Highlight> {
        self.highlights()
            .map(|(_, _, h)| h)
            .find(|h| &h.audio_key == key)
    }

    /// 文本全文，块之间以换行分隔
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub(crate) fn normalize_inline(nodes: &mut Vec<TextNode>) {
    let mut merged: Vec<TextNode> = Vec::with_capacity(nodes.len());
    for mut node in nodes.drain(..) {
        if node.text.is_empty() {
            continue;
        }
        canonicalize_marks(&mut node.marks);
        match merged.last_mut() {
            Some(last) if last.marks == node.marks => last.text.push_str(&node.text),
            _ => merged.push(node),
        }
    }
    *nodes = merged;
}

fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// 在字符偏移处拆分行内节点
pub(crate) fn split_inline(nodes: Vec<TextNode>, offset: usize) -> (Vec<TextNode>, Vec<TextNode>) {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut remaining = offset;

    for node in nodes {
        if remaining == 0 {
            right.push(node);
            continue;
        }
        let len = node.len();
        if len <= remaining {
            remaining -= len;
            left.push(node);
        } else {
            let at = byte_offset(&node.text, remaining);
            let (head, tail) = node.text.split_at(at);
            left.push(TextNode::with_marks(head, node.marks.clone()));
            right.push(TextNode::with_marks(tail, node.marks.clone()));
            remaining = 0;
        }
    }

    (left, right)
}

/// 第 index 个字符上的标记
pub(crate) fn char_marks(nodes: &[TextNode], index: usize) -> Option<Vec<Mark>> {
    let mut start = 0;
    for node in nodes {
        let len = node.len();
        if index < start + len {
            return Some(node.marks.clone());
        }
        start += len;
    }
    None
}

/// 在 offset 处输入文本时继承的标记：前一个字符，块首则取后一个字符
pub(crate) fn marks_for_insert(nodes: &[TextNode], offset: usize) -> Vec<Mark> {
    let index = offset.saturating_sub(1);
    char_marks(nodes, index).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlight(key: &str) -> Highlight {
        Highlight {
            audio_key: AudioKey::new(key).unwrap(),
            tone: "Neutral".to_string(),
            tone_emoji: "💬".to_string(),
            color: "rgba(37, 99, 235, 0.2)".to_string(),
            voice: None,
            prompt: "Say: \"hello\"".to_string(),
        }
    }

    #[test]
    fn test_normalize_merges_equal_marks_and_drops_empty() {
        let block = Block::paragraph(vec![
            TextNode::plain("ab"),
            TextNode::plain(""),
            TextNode::plain("cd"),
            TextNode::with_marks("ef", vec![Mark::Bold]),
        ]);
        assert_eq!(block.content().len(), 2);
        assert_eq!(block.content()[0].text, "abcd");
    }

    #[test]
    fn test_canonical_mark_order() {
        let h = highlight("k1");
        let block = Block::paragraph(vec![
            TextNode::with_marks("a", vec![Mark::Highlight(h.clone()), Mark::Bold]),
            TextNode::with_marks("b", vec![Mark::Bold, Mark::Highlight(h)]),
        ]);
        assert_eq!(block.content().len(), 1);
        assert_eq!(block.content()[0].text, "ab");
    }

    #[test]
    fn test_split_inline_multibyte() {
        let nodes = vec![TextNode::plain("héllo"), TextNode::plain("✨x")];
        let (left, right) = split_inline(nodes, 6);
        let left: String = left.iter().map(|n| n.text.as_str()).collect();
        let right: String = right.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(left, "héllo✨");
        assert_eq!(right, "x");
    }

    #[test]
    fn test_text_node_positions() {
        let doc = Document::new(vec![
            Block::heading(1, vec![TextNode::plain("Title")]),
            Block::paragraph(vec![
                TextNode::plain("say "),
                TextNode::highlighted("hello", highlight("k1")),
            ]),
        ]);
        let (pos, _, h) = doc.highlights().next().unwrap();
        assert_eq!(pos, TextPos::new(1, 4));
        assert_eq!(h.audio_key.as_str(), "k1");
        assert_eq!(doc.plain_text(), "Title\nsay hello");
    }

    #[test]
    fn test_editor_json_shape() {
        let doc = Document::new(vec![Block::paragraph(vec![
            TextNode::with_marks("bold", vec![Mark::Bold]),
            TextNode::highlighted("hi", highlight("k1")),
        ])]);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["type"], "doc");
        assert_eq!(json["content"][0]["type"], "paragraph");
        assert_eq!(json["content"][0]["content"][0]["type"], "text");
        assert_eq!(json["content"][0]["content"][0]["marks"][0]["type"], "bold");
        let mark = &json["content"][0]["content"][1]["marks"][0];
        assert_eq!(mark["type"], "highlight");
        assert_eq!(mark["attrs"]["audioKey"], "k1");
        assert_eq!(mark["attrs"]["toneEmoji"], "💬");

        let back: Document = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_parse_editor_json() {
        let json = r#"{
            "type": "doc",
            "content": [
                {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Examples"}]},
                {"type": "paragraph", "content": [
                    {"type": "text", "text": "Or whispered.", "marks": [
                        {"type": "highlight", "attrs": {"audioKey": "orus-whispered", "tone": "whispering",
                         "toneEmoji": "🦗", "color": "rgba(186, 64, 129, 0.2)", "voice": "Orus", "prompt": "p"}}
                    ]},
                    {"type": "text", "text": " plain", "marks": [{"type": "italic"}]}
                ]},
                {"type": "paragraph"}
            ]
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.blocks().len(), 3);
        let h = doc
            .find_highlight(&AudioKey::new("orus-whispered").unwrap())
            .unwrap();
        assert_eq!(h.voice.as_deref(), Some("Orus"));
        assert!(doc.block(2).unwrap().is_empty());
    }
}
