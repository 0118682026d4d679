//! Screen-space bloom post-processing.
//!
//! Isolates the bright parts of a frame, blurs them with a separable
//! gaussian and adds the glow back over the original. Rendering goes
//! through [`backend::RenderBackend`]; a wgpu backend and a software
//! reference backend are included.

pub mod backend;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod settings;

pub use backend::cpu::{CpuBackend, CpuSurface};
pub use backend::gpu::{GpuContext, WgpuBackend, WgpuSurface};
pub use backend::RenderBackend;
pub use error::BloomError;
pub use filter::{compute_blur_parameters, FilterCoefficients};
pub use glimmer_config::BloomPreset;
pub use pipeline::BloomPipeline;
pub use settings::BloomSettings;
