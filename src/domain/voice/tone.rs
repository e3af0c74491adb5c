//! Voice Context - 语气预设
//!
//! 每种语气都是一个纯文本变换：把选中的文本包装成发送给合成接口的提示词。

use serde::Serialize;

/// 语气预设
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tone {
    Neutral,
    Mysterious,
    Excited,
    Surprised,
    Sad,
    Angry,
    Uncertain,
    Whispering,
    Yelling,
    Slow,
    Fast,
    Surfer,
    Shakespeare,
    Pirate,
}

impl Tone {
    pub const ALL: [Tone; 14] = [
        Tone::Neutral,
        Tone::Mysterious,
        Tone::Excited,
        Tone::Surprised,
        Tone::Sad,
        Tone::Angry,
        Tone::Uncertain,
        Tone::Whispering,
        Tone::Yelling,
        Tone::Slow,
        Tone::Fast,
        Tone::Surfer,
        Tone::Shakespeare,
        Tone::Pirate,
    ];

    /// 按名称查找（不区分大小写）
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|tone| tone.name().eq_ignore_ascii_case(name))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tone::Neutral => "Neutral",
            Tone::Mysterious => "Mysterious",
            Tone::Excited => "Excited",
            Tone::Surprised => "Surprised",
            Tone::Sad => "Sad",
            Tone::Angry => "Angry",
            Tone::Uncertain => "Uncertain",
            Tone::Whispering => "Whispering",
            Tone::Yelling => "Yelling",
            Tone::Slow => "Slow",
            Tone::Fast => "Fast",
            Tone::Surfer => "Surfer",
            Tone::Shakespeare => "Shakespeare",
            Tone::Pirate => "Pirate",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Tone::Neutral => "💬",
            Tone::Mysterious => "🔮",
            Tone::Excited => "😃",
            Tone::Surprised => "😮",
            Tone::Sad => "😔",
            Tone::Angry => "😡",
            Tone::Uncertain => "❓",
            Tone::Whispering => "🦗",
            Tone::Yelling => "🗯️",
            Tone::Slow => "🐢",
            Tone::Fast => "🐰",
            Tone::Surfer => "🏄",
            Tone::Shakespeare => "🎭",
            Tone::Pirate => "🏴‍☠️",
        }
    }

    /// 生成提示词
    pub fn transform(&self, text: &str) -> String {
        match self {
            Tone::Neutral => format!("Say: \"{}\"", text),
            Tone::Mysterious => format!(
                "Say this like a dramatic wizard speaking very mysteriously: \"{}\"",
                text
            ),
            Tone::Excited => format!(
                "Say this like a very enthusiastic excited fast-talking friend: \"{}!\"",
                text.to_uppercase()
            ),
            Tone::Surprised => format!(
                "Say with genuine shock and amazement: \"Oh wow! {}!?\"",
                text
            ),
            Tone::Sad => format!(
                "Say in a melancholic and dejected tone: \"*sigh* {}...\"",
                text
            ),
            Tone::Angry => format!(
                "Say with intense anger and frustration: \"{}!!!\"",
                text.to_uppercase()
            ),
            Tone::Uncertain => format!(
                "Say this like a question, even if it's not a question, as if you are very uncertain and confused about what you're saying: \"Hmm... {}?\"",
                text
            ),
            Tone::Whispering => format!(
                "Whisper in a hushed, secretive voice: \"{}\"",
                text.to_lowercase()
            ),
            Tone::Yelling => format!(
                "Shout with maximum volume, with urgency like you are yelling at someone: \"{}!!!\"",
                text.to_uppercase()
            ),
            Tone::Slow => format!(
                "Say very slowly and deliberately: \"{}...\"",
                text.split(' ').collect::<Vec<_>>().join("... ")
            ),
            Tone::Fast => format!(
                "Say rapidly and energetically: \"{}\"",
                text.split(' ').collect::<Vec<_>>().join("-")
            ),
            Tone::Surfer => format!(
                "Say this like a mellow, laid-back surfer, speaking slowly and using surfer slang: \"Woah... {}, like, totally radical!\"",
                text
            ),
            Tone::Shakespeare => format!(
                "Say this like a Shakespearean actor speaking a very dramatic monologue: \"{}\"",
                text
            ),
            Tone::Pirate => format!(
                "Say this like a pirate: \"Arrg, {}... arrg\"",
                text.replace('r', "rrr")
            ),
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
