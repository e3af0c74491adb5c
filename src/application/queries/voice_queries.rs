//! Voice Queries - 音色与语气查询

/// 列出音色
#[derive(Debug, Clone)]
pub struct ListVoices;

/// 列出语气
#[derive(Debug, Clone)]
pub struct ListTones;

/// 预览语气生成的提示词
#[derive(Debug, Clone)]
pub struct PreviewPrompt {
    pub tone: String,
    pub text: String,
}
