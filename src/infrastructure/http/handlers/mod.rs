//! HTTP Handlers

mod audio;
mod document;
mod generate;
mod highlight;
mod ping;
mod voice;
mod websocket;

pub use audio::*;
pub use document::*;
pub use generate::*;
pub use highlight::*;
pub use ping::*;
pub use voice::*;
pub use websocket::*;
