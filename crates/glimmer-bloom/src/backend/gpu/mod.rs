//! wgpu implementation of [`RenderBackend`].
//!
//! Every draw records and submits its own render pass, so passes execute
//! in call order and a surface written by one pass is complete before the
//! next pass samples it.

mod context;
mod library;
mod reflect;
mod surface;
mod uniforms;

#[cfg(test)]
mod tests;

pub use context::GpuContext;
pub use library::{ProgramLibrary, WgpuProgram};
pub use reflect::reflect_program;
pub use surface::WgpuSurface;
pub use uniforms::pack_uniforms;

use glimmer_common::ColorFormat;
use image::RgbaImage;
use wgpu::util::DeviceExt;

use super::{
    AddressMode, FilterMode, ProgramHandle, ProgramParameters, RenderBackend, SamplerState,
    SurfaceHandle, MAX_TEXTURE_UNITS,
};
use crate::error::BloomError;

/// Headless wgpu backend rendering into offscreen textures.
pub struct WgpuBackend {
    context: GpuContext,
    library: ProgramLibrary,
    back_buffer_format: ColorFormat,
    sampler_states: [SamplerState; MAX_TEXTURE_UNITS],
    samplers: Vec<wgpu::Sampler>,
}

impl WgpuBackend {
    /// Wrap `context`, rendering programs into surfaces of `back_buffer_format`.
    pub fn new(context: GpuContext, back_buffer_format: ColorFormat) -> Result<Self, BloomError> {
        surface::texture_format(back_buffer_format)?;

        let sampler_states = [SamplerState::default(); MAX_TEXTURE_UNITS];
        let samplers = sampler_states
            .iter()
            .map(|state| create_sampler(&context.device, *state))
            .collect();

        tracing::info!(
            "wgpu backend ready on {} ({back_buffer_format})",
            context.adapter_info.name
        );

        Ok(Self {
            context,
            library: ProgramLibrary::new(),
            back_buffer_format,
            sampler_states,
            samplers,
        })
    }

    pub fn context(&self) -> &GpuContext {
        &self.context
    }

    /// Register or replace a fragment program by name.
    pub fn register_program(&mut self, name: &str, source: &str) {
        self.library.register(name, source);
    }

    /// Drop compiled programs. Handles already given out stay valid until
    /// the pipeline reloads them.
    pub fn invalidate_programs(&mut self) {
        self.library.invalidate_all();
    }

    pub fn sampler_state(&self, unit: usize) -> Option<SamplerState> {
        self.sampler_states.get(unit).copied()
    }

    /// Create a back-buffer-format surface holding `image`.
    pub fn upload_image(&mut self, image: &RgbaImage) -> Result<WgpuSurface, BloomError> {
        let surface = self.create_surface(image.width(), image.height(), self.back_buffer_format)?;
        surface.upload(&self.context.queue, image)?;
        Ok(surface)
    }

    /// Copy `surface` back to host memory.
    pub fn read_surface(&self, surface: &WgpuSurface) -> Result<RgbaImage, BloomError> {
        surface.read_back(&self.context)
    }
}

impl RenderBackend for WgpuBackend {
    type Program = WgpuProgram;
    type Surface = WgpuSurface;

    fn load_program(&mut self, name: &str) -> Result<WgpuProgram, BloomError> {
        let target = surface::texture_format(self.back_buffer_format)?;
        self.library.load(&self.context.device, target, name)
    }

    fn back_buffer_format(&self) -> ColorFormat {
        self.back_buffer_format
    }

    fn create_surface(
        &mut self,
        width: u32,
        height: u32,
        format: ColorFormat,
    ) -> Result<WgpuSurface, BloomError> {
        let limit = self.context.device.limits().max_texture_dimension_2d;
        if width == 0 || height == 0 || width > limit || height > limit {
            return Err(BloomError::InvalidResolution { width, height });
        }
        WgpuSurface::new(&self.context.device, width, height, format, "bloom surface")
    }

    fn set_sampler_state(&mut self, unit: usize, state: SamplerState) {
        if unit >= MAX_TEXTURE_UNITS {
            tracing::warn!("ignoring sampler state for texture unit {unit}");
            return;
        }
        if self.sampler_states[unit] != state {
            self.sampler_states[unit] = state;
            self.samplers[unit] = create_sampler(&self.context.device, state);
        }
    }

    fn draw_fullscreen_quad(
        &mut self,
        inputs: &[&WgpuSurface],
        output: &mut WgpuSurface,
        program: &WgpuProgram,
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
        // Pipelines are compiled against the back-buffer format.
        if output.format() != self.back_buffer_format {
            return Err(BloomError::UnsupportedFormat(output.format()));
        }

        let uniforms = pack_uniforms(info, params)?;
        let device = &self.context.device;
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("bloom pass uniforms"),
            contents: &uniforms,
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let mut entries = vec![wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }];
        for (unit, input) in inputs.iter().enumerate() {
            let binding = 1 + 2 * unit as u32;
            entries.push(wgpu::BindGroupEntry {
                binding,
                resource: wgpu::BindingResource::TextureView(input.view()),
            });
            entries.push(wgpu::BindGroupEntry {
                binding: binding + 1,
                resource: wgpu::BindingResource::Sampler(&self.samplers[unit]),
            });
        }
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(info.name.as_str()),
            layout: program.bind_group_layout(),
            entries: &entries,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some(info.name.as_str()),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(info.name.as_str()),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: output.view(),
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(program.pipeline());
            pass.set_bind_group(0, &bind_group, &[]);
            pass.draw(0..3, 0..1);
        }
        self.context.queue.submit(Some(encoder.finish()));

        tracing::trace!("{} -> {}", info.name, output.size());
        Ok(())
    }
}

fn create_sampler(device: &wgpu::Device, state: SamplerState) -> wgpu::Sampler {
    let filter = match state.filter {
        FilterMode::Linear => wgpu::FilterMode::Linear,
        FilterMode::Point => wgpu::FilterMode::Nearest,
    };
    let address = match state.address {
        AddressMode::Clamp => wgpu::AddressMode::ClampToEdge,
        AddressMode::Wrap => wgpu::AddressMode::Repeat,
    };
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("bloom sampler"),
        address_mode_u: address,
        address_mode_v: address,
        address_mode_w: address,
        mag_filter: filter,
        min_filter: filter,
        ..Default::default()
    })
}
