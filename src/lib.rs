//! Voice Cursor - 文本高亮与语音片段绑定服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Audio Context: PCM 转 WAV、音频片段与键
//! - Document Context: 文档模型、编辑事务、高亮与音频的绑定校验
//! - Voice Context: 音色与语气预设
//!
//! 应用层 (application/):
//! - Ports: 端口定义（AudioStore, DocumentSession, SpeechSynthesizer, PresetSource, HoverMenu）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + WebSocket
//! - Memory: AudioStore, DocumentSession, HoverMenus 内存实现
//! - Persistence: Sled 存储
//! - Adapters: Gemini 合成客户端, 预置音频来源
//! - Events: WebSocket 事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
