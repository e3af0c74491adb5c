//! Document Context - 默认演示文档
//!
//! 文档中的高亮引用预置音频，启动时由预置加载流程写入存储。

use super::model::{Block, Document, Highlight, TextNode};
use crate::domain::audio::AudioKey;
use crate::domain::voice::voice_color;

fn preset(
    text: &str,
    key: &str,
    tone: &str,
    emoji: &str,
    voice: &str,
    prompt: &str,
) -> Option<TextNode> {
    let audio_key = AudioKey::new(key).ok()?;
    Some(TextNode::highlighted(
        text,
        Highlight {
            audio_key,
            tone: tone.to_string(),
            tone_emoji: emoji.to_string(),
            color: voice_color(voice).to_string(),
            voice: Some(voice.to_string()),
            prompt: prompt.to_string(),
        },
    ))
}

fn paragraph(nodes: impl IntoIterator<Item = Option<TextNode>>) -> Block {
    Block::paragraph(nodes.into_iter().flatten().collect())
}

/// 默认文档模板
pub fn default_document() -> Document {
    Document::new(vec![
        Block::heading(1, vec![TextNode::plain("✨ Voice Cursor")]),
        Block::paragraph(vec![TextNode::plain(
            "👋 Hello! This is a starter demo using native audio in Gemini 2.0. Just write text below, then highlight it to hear it spoken in different ways.",
        )]),
        paragraph([preset(
            "You can hear things read verrrrry mysteriously.",
            "orus-mysterious",
            "mysterious",
            "🔮",
            "Orus",
            "Say this like a dramatic wizard speaking very mysteriously: \"You can hear things read verrrrry mysteriously.\"",
        )]),
        paragraph([preset(
            "Or whispered, like a secret.",
            "orus-whispered",
            "whispering",
            "🦗",
            "Orus",
            "Whisper in a hushed, secretive tone: \"or whispered, like a secret.\"",
        )]),
        paragraph([preset(
            "Or spoken in … with lots … and lots … of DRAMA!",
            "orus-dramatic",
            "dramatic",
            "🎭",
            "Orus",
            "Say this like a Shakespearean actor speaking a very dramatic monologue: \"Or spoken in … with lots … and lots … of DRAMA!\"",
        )]),
        Block::heading(2, vec![TextNode::plain("Examples")]),
        paragraph([
            preset(
                "\"Trudy, my friend, I must tell you about some ancient mysteries.\"",
                "charon-mysterious",
                "mysterious",
                "🔮",
                "Charon",
                "Say this like a dramatic wizard speaking very mysteriously: \"Trudy, my friend, I must tell you about some ancient mysteries.\"",
            ),
            Some(TextNode::plain(" Alex said.")),
        ]),
        paragraph([
            preset(
                "\"Oh hey Alex, what's going on?\"",
                "kore-neutral",
                "casual",
                "💬",
                "Kore",
                "Say: \"Oh hey Alex, what's going on?\"",
            ),
            Some(TextNode::plain(" Trudy asked.")),
        ]),
        paragraph([
            preset(
                "\"Mysterious, mysteries, oh my gosh I love mysteries!!!\"",
                "zephyr-excited",
                "excited",
                "😃",
                "Zephyr",
                "Say this like a very excited person: \"Mysterious, mysteries, oh my gosh I love mysteries!!!\"",
            ),
            Some(TextNode::plain(
                " Jordan exclaimed, running towards the group excitedly.",
            )),
        ]),
        paragraph([
            preset(
                "\"Woah.. can everyone, just chill …\"",
                "orus-surfer",
                "surfer",
                "🏄",
                "Orus",
                "Say this like a chill surfer: \"Woah.. can everyone, just chill …\"",
            ),
            Some(TextNode::plain(" said Dan.")),
        ]),
        paragraph([
            preset(
                "\"Can you make this quick. I gotta run in like 2 minutes\"",
                "leda-fast",
                "fast",
                "🐰",
                "Leda",
                "Say this like a fast person: \"Can you make this quick. I gotta run in like 2 minutes\"",
            ),
            Some(TextNode::plain(" Suz said.")),
        ]),
        Block::heading(2, vec![TextNode::plain("Give it a try")]),
        Block::paragraph(vec![TextNode::plain("Press '/' for commands")]),
    ])
}

/// 按出现顺序列出文档引用的音频键（去重）
pub fn extract_audio_keys(doc: &Document) -> Vec<AudioKey> {
    let mut keys: Vec<AudioKey> = Vec::new();
    for (_, _, highlight) in doc.highlights() {
        if !keys.contains(&highlight.audio_key) {
            keys.push(highlight.audio_key.clone());
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_preset_keys() {
        let keys: Vec<String> = extract_audio_keys(&default_document())
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(
            keys,
            vec![
                "orus-mysterious",
                "orus-whispered",
                "orus-dramatic",
                "charon-mysterious",
                "kore-neutral",
                "zephyr-excited",
                "orus-surfer",
                "leda-fast",
            ]
        );
    }

    #[test]
    fn test_default_document_layout() {
        let doc = default_document();
        assert_eq!(doc.blocks().len(), 13);
        assert!(matches!(doc.blocks()[0], Block::Heading { attrs, .. } if attrs.level == 1));
        assert_eq!(doc.blocks()[6].text(), "\"Trudy, my friend, I must tell you about some ancient mysteries.\" Alex said.");

        let key = AudioKey::new("leda-fast").unwrap();
        let h = doc.find_highlight(&key).unwrap();
        assert_eq!(h.color, "rgba(255, 165, 0, 0.2)");
        assert_eq!(h.tone_emoji, "🐰");
    }
}
