//! Voice Context - 音色预设

use serde::Serialize;

/// 未知音色使用的灰色
pub const DEFAULT_VOICE_COLOR: &str = "rgba(168, 162, 158, 0.2)";

/// 合成音色及其高亮颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoicePreset {
    pub name: &'static str,
    pub color: &'static str,
}

pub const VOICE_PRESETS: [VoicePreset; 8] = [
    VoicePreset { name: "Zephyr", color: "rgba(37, 99, 235, 0.2)" },
    VoicePreset { name: "Puck", color: "rgba(147, 51, 234, 0.2)" },
    VoicePreset { name: "Charon", color: "rgba(224, 0, 0, 0.2)" },
    VoicePreset { name: "Kore", color: "rgba(234, 179, 8, 0.2)" },
    VoicePreset { name: "Fenrir", color: "rgba(0, 138, 0, 0.2)" },
    VoicePreset { name: "Leda", color: "rgba(255, 165, 0, 0.2)" },
    VoicePreset { name: "Orus", color: "rgba(186, 64, 129, 0.2)" },
    VoicePreset { name: "Gemini H", color: DEFAULT_VOICE_COLOR },
];

impl VoicePreset {
    pub fn find(name: &str) -> Option<&'static VoicePreset> {
        VOICE_PRESETS.iter().find(|voice| voice.name == name)
    }
}

/// 获取音色对应的高亮颜色，未知音色回退为灰色
pub fn voice_color(name: &str) -> &'static str {
    match VoicePreset::find(name) {
        Some(voice) => voice.color,
        None => {
            tracing::warn!(voice = %name, "Voice color not found, using default color");
            DEFAULT_VOICE_COLOR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_voice_color() {
        assert_eq!(voice_color("Orus"), "rgba(186, 64, 129, 0.2)");
        assert_eq!(voice_color("Zephyr"), "rgba(37, 99, 235, 0.2)");
    }

    #[test]
    fn test_unknown_voice_falls_back_to_gray() {
        assert_eq!(voice_color("Nobody"), DEFAULT_VOICE_COLOR);
        assert!(VoicePreset::find("orus").is_none());
    }
}
