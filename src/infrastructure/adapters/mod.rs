//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod presets;
pub mod synth;

pub use presets::*;
pub use synth::*;
