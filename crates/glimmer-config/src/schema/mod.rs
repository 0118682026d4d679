//! Configuration schema types for Glimmer.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod bloom;
mod render;

pub use bloom::*;
pub use render::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Glimmer.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GlimmerConfig {
    pub bloom: BloomConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}
