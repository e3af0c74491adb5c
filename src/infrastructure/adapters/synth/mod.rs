//! Synth Adapter - 语音合成客户端实现

mod fake_synth_client;
mod gemini_client;

pub use fake_synth_client::{FakeSynthBehavior, FakeSynthClient, FakeSynthClientConfig};
pub use gemini_client::{GeminiClient, GeminiClientConfig};
