//! Sled Persistence
//!
//! 音频片段（bincode）与文档（JSON）的本地持久化

mod store;

pub use store::{SledStore, SledStoreConfig};
