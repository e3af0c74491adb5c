//! Events - WebSocket 事件推送

mod publisher;

pub use publisher::{EventPublisher, WsEvent, ERROR_DISMISS_MS};
