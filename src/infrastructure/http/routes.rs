//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                     GET   健康检查 + 预置音频就绪状态
//! - /api/voice/list               GET   列出音色
//! - /api/voice/generate           POST  为选区生成语音
//! - /api/tone/list                GET   列出语气
//! - /api/tone/preview             POST  预览语气提示词
//! - /api/document                 GET   当前文档及版本
//! - /api/document/edit            POST  执行编辑事务
//! - /api/highlight/prompt         POST  获取高亮提示词
//! - /api/highlight/enter          POST  打开悬停菜单
//! - /api/highlight/leave          POST  关闭悬停菜单
//! - /api/audio                    POST  获取音频
//! - /api/audio/download/{key}     GET   下载音频附件
//! - /api/playback/{token}         GET   通过临时令牌播放
//! - /ws/events                    WS    文档 / 失效 / 生成事件

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws/events", get(handlers::events_websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/voice", voice_routes())
        .nest("/tone", tone_routes())
        .nest("/document", document_routes())
        .nest("/highlight", highlight_routes())
        .nest("/audio", audio_routes())
        .route("/playback/:token", get(handlers::playback))
}

/// Voice 路由
fn voice_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_voices))
        .route("/generate", post(handlers::generate_voice))
}

/// Tone 路由
fn tone_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/list", get(handlers::list_tones))
        .route("/preview", post(handlers::preview_prompt))
}

/// Document 路由
fn document_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::get_document))
        .route("/edit", post(handlers::edit_document))
}

/// Highlight 路由
fn highlight_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/prompt", post(handlers::get_prompt))
        .route("/enter", post(handlers::enter_highlight))
        .route("/leave", post(handlers::leave_highlight))
}

/// Audio 路由
fn audio_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(handlers::get_audio))
        .route("/download/:audio_key", get(handlers::download_audio))
}
