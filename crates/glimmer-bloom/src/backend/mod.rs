//! Rendering backend seam.
//!
//! The bloom pipeline never talks to a graphics API directly. It resolves
//! programs by name, allocates surfaces, installs sampler overrides and
//! draws fullscreen quads through [`RenderBackend`]. Two implementations
//! ship with the crate: [`cpu::CpuBackend`] (software reference) and
//! [`gpu::WgpuBackend`].

pub mod cpu;
pub mod gpu;
mod params;
mod types;

pub use params::*;
pub use types::*;

use glimmer_common::{ColorFormat, PhysicalSize};

use crate::error::BloomError;

/// Number of texture units a pass may sample from.
pub const MAX_TEXTURE_UNITS: usize = 2;

/// A loaded program as seen by the pipeline.
pub trait ProgramHandle {
    /// Parameter and texture-input metadata declared by the program.
    fn info(&self) -> &ProgramInfo;
}

/// A color surface a pass can sample from or render into.
pub trait SurfaceHandle {
    fn size(&self) -> PhysicalSize;
    fn format(&self) -> ColorFormat;
}

/// Host rendering services consumed by the bloom pipeline.
pub trait RenderBackend {
    /// Non-owning reference to a program owned by the host's program system.
    type Program: ProgramHandle + Clone;
    type Surface: SurfaceHandle;

    /// Resolve (compiling if needed) the program registered under `name`.
    fn load_program(&mut self, name: &str) -> Result<Self::Program, BloomError>;

    /// Pixel format of the host back buffer.
    fn back_buffer_format(&self) -> ColorFormat;

    /// Allocate a color surface without a depth buffer.
    fn create_surface(
        &mut self,
        width: u32,
        height: u32,
        format: ColorFormat,
    ) -> Result<Self::Surface, BloomError>;

    /// Give a surface back to the backend.
    fn release_surface(&mut self, surface: Self::Surface) {
        drop(surface);
    }

    /// Override filtering and addressing for one texture unit.
    fn set_sampler_state(&mut self, unit: usize, state: SamplerState);

    /// Rasterize one rectangle covering `output`, sampling `inputs[unit]`
    /// through `program` with `params` bound.
    fn draw_fullscreen_quad(
        &mut self,
        inputs: &[&Self::Surface],
        output: &mut Self::Surface,
        program: &Self::Program,
        params: &ProgramParameters,
    ) -> Result<(), BloomError>;
}
