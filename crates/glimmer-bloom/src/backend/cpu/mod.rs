//! Software reference backend.
//!
//! Runs every pass on the calling thread, one fragment per output pixel,
//! with the same texel-centre and sampler conventions as the GPU. Used by
//! the pipeline tests and by the CLI's `--backend cpu`.

mod programs;
mod sampling;
mod surface;

#[cfg(test)]
mod tests;

pub use programs::CpuProgram;
pub use surface::CpuSurface;

use std::collections::HashMap;

use glimmer_common::{ColorFormat, PhysicalSize};

use super::{
    ProgramHandle, ProgramParameters, RenderBackend, SamplerState, SurfaceHandle,
    MAX_TEXTURE_UNITS,
};
use crate::error::BloomError;
use programs::Shader;

/// Blur taps declared by the built-in gaussian program.
pub const DEFAULT_SAMPLE_COUNT: usize = 15;

/// One executed pass, as recorded by [`CpuBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassRecord {
    pub program: String,
    pub inputs: Vec<PhysicalSize>,
    pub output: PhysicalSize,
}

/// Software implementation of [`RenderBackend`].
#[derive(Debug)]
pub struct CpuBackend {
    programs: HashMap<String, CpuProgram>,
    back_buffer_format: ColorFormat,
    samplers: [SamplerState; MAX_TEXTURE_UNITS],
    pass_log: Vec<PassRecord>,
    surfaces_created: usize,
    surfaces_released: usize,
}

impl CpuBackend {
    /// Backend with the three built-in programs registered.
    pub fn new() -> Self {
        let mut programs = HashMap::new();
        for program in [
            CpuProgram::extract(),
            CpuProgram::blur(DEFAULT_SAMPLE_COUNT, DEFAULT_SAMPLE_COUNT),
            CpuProgram::combine(),
        ] {
            programs.insert(program.info().name.clone(), program);
        }

        Self {
            programs,
            back_buffer_format: ColorFormat::Rgba8Unorm,
            samplers: [SamplerState::default(); MAX_TEXTURE_UNITS],
            pass_log: Vec::new(),
            surfaces_created: 0,
            surfaces_released: 0,
        }
    }

    pub fn with_back_buffer_format(mut self, format: ColorFormat) -> Self {
        self.back_buffer_format = format;
        self
    }

    /// Replace the gaussian program with one declaring `capacity` taps.
    pub fn with_blur_capacity(self, capacity: usize) -> Self {
        self.with_blur_layout(capacity, capacity)
    }

    /// Replace the gaussian program with one whose weight and offset arrays
    /// have different lengths.
    pub fn with_blur_layout(mut self, weight_slots: usize, offset_slots: usize) -> Self {
        let program = CpuProgram::blur(weight_slots, offset_slots);
        self.programs.insert(program.info().name.clone(), program);
        self
    }

    /// Unregister a program so loading it fails.
    pub fn without_program(mut self, name: &str) -> Self {
        self.programs.remove(name);
        self
    }

    /// Passes executed so far, oldest first.
    pub fn pass_log(&self) -> &[PassRecord] {
        &self.pass_log
    }

    pub fn sampler_state(&self, unit: usize) -> Option<SamplerState> {
        self.samplers.get(unit).copied()
    }

    pub fn surfaces_created(&self) -> usize {
        self.surfaces_created
    }

    pub fn surfaces_released(&self) -> usize {
        self.surfaces_released
    }

    /// Surfaces created and not yet released.
    pub fn live_surfaces(&self) -> usize {
        self.surfaces_created - self.surfaces_released
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for CpuBackend {
    type Program = CpuProgram;
    type Surface = CpuSurface;

    fn load_program(&mut self, name: &str) -> Result<CpuProgram, BloomError> {
        self.programs
            .get(name)
            .cloned()
            .ok_or_else(|| BloomError::ProgramLoad {
                name: name.to_owned(),
                reason: "no program registered under this name".into(),
            })
    }

    fn back_buffer_format(&self) -> ColorFormat {
        self.back_buffer_format
    }

    fn create_surface(
        &mut self,
        width: u32,
        height: u32,
        format: ColorFormat,
    ) -> Result<CpuSurface, BloomError> {
        if width == 0 || height == 0 {
            return Err(BloomError::InvalidResolution { width, height });
        }
        self.surfaces_created += 1;
        Ok(CpuSurface::new(width, height, format))
    }

    fn release_surface(&mut self, surface: CpuSurface) {
        self.surfaces_released += 1;
        drop(surface);
    }

    fn set_sampler_state(&mut self, unit: usize, state: SamplerState) {
        match self.samplers.get_mut(unit) {
            Some(slot) => *slot = state,
            None => tracing::warn!("ignoring sampler state for texture unit {unit}"),
        }
    }

    fn draw_fullscreen_quad(
        &mut self,
        inputs: &[&CpuSurface],
        output: &mut CpuSurface,
        program: &CpuProgram,
        params: &ProgramParameters,
    ) -> Result<(), BloomError> {
        let info = program.info();
        if inputs.len() != info.texture_inputs {
            return Err(BloomError::InputCount {
                program: info.name.clone(),
                expected: info.texture_inputs,
                actual: inputs.len(),
            });
        }
        params.check_declared(info)?;
        let shader = Shader::bind(program, params)?;

        let size = output.size();
        for y in 0..size.height {
            let v = (y as f32 + 0.5) / size.height as f32;
            for x in 0..size.width {
                let u = (x as f32 + 0.5) / size.width as f32;
                let color = shader.shade(inputs, &self.samplers, [u, v]);
                output.write(x, y, color);
            }
        }

        self.pass_log.push(PassRecord {
            program: info.name.clone(),
            inputs: inputs.iter().map(|s| s.size()).collect(),
            output: size,
        });
        Ok(())
    }
}
