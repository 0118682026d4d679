//! Named WGSL programs, compiled on first use.

use std::collections::HashMap;
use std::sync::Arc;

use super::reflect::reflect_program;
use crate::backend::{
    ProgramHandle, ProgramInfo, BLUR_PROGRAM, COMBINE_PROGRAM, EXTRACT_PROGRAM, MAX_TEXTURE_UNITS,
};
use crate::error::BloomError;

const FULLSCREEN_WGSL: &str = include_str!("../../shaders/fullscreen.wgsl");

struct CompiledProgram {
    info: ProgramInfo,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

/// Shared handle to a compiled program. Cloning is cheap; the library keeps
/// its own reference until the program is invalidated.
#[derive(Clone)]
pub struct WgpuProgram {
    inner: Arc<CompiledProgram>,
}

impl WgpuProgram {
    pub(crate) fn pipeline(&self) -> &wgpu::RenderPipeline {
        &self.inner.pipeline
    }

    pub(crate) fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.inner.bind_group_layout
    }
}

impl ProgramHandle for WgpuProgram {
    fn info(&self) -> &ProgramInfo {
        &self.inner.info
    }
}

/// Fragment program sources by name plus a cache of compiled pipelines.
pub struct ProgramLibrary {
    sources: HashMap<String, String>,
    compiled: HashMap<String, WgpuProgram>,
}

impl ProgramLibrary {
    /// Library holding the built-in bloom programs.
    pub fn new() -> Self {
        let mut library = Self {
            sources: HashMap::new(),
            compiled: HashMap::new(),
        };
        library.register(EXTRACT_PROGRAM, include_str!("../../shaders/bloom_extract.wgsl"));
        library.register(BLUR_PROGRAM, include_str!("../../shaders/gaussian_blur.wgsl"));
        library.register(COMBINE_PROGRAM, include_str!("../../shaders/bloom_combine.wgsl"));
        library
    }

    /// Add or replace the fragment source for `name`. The shared
    /// fullscreen vertex stage is prepended at compile time.
    pub fn register(&mut self, name: &str, source: &str) {
        self.sources.insert(name.to_owned(), source.to_owned());
        self.compiled.remove(name);
    }

    /// Drop every compiled pipeline; the next load recompiles.
    pub fn invalidate_all(&mut self) {
        self.compiled.clear();
    }

    pub(crate) fn load(
        &mut self,
        device: &wgpu::Device,
        target: wgpu::TextureFormat,
        name: &str,
    ) -> Result<WgpuProgram, BloomError> {
        if let Some(program) = self.compiled.get(name) {
            return Ok(program.clone());
        }

        let source = self.sources.get(name).ok_or_else(|| BloomError::ProgramLoad {
            name: name.to_owned(),
            reason: "no program registered under this name".into(),
        })?;
        let info = reflect_program(name, source)?;
        if info.texture_inputs > MAX_TEXTURE_UNITS {
            return Err(BloomError::ProgramLoad {
                name: name.to_owned(),
                reason: format!(
                    "samples {} textures, at most {MAX_TEXTURE_UNITS} are supported",
                    info.texture_inputs
                ),
            });
        }

        let program = compile(device, target, info, &format!("{FULLSCREEN_WGSL}\n{source}"))?;
        tracing::debug!("compiled program '{name}' for {target:?}");
        self.compiled.insert(name.to_owned(), program.clone());
        Ok(program)
    }
}

impl Default for ProgramLibrary {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(
    device: &wgpu::Device,
    target: wgpu::TextureFormat,
    info: ProgramInfo,
    source: &str,
) -> Result<WgpuProgram, BloomError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(info.name.as_str()),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let mut entries = vec![wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }];
    for unit in 0..info.texture_inputs as u32 {
        entries.push(wgpu::BindGroupLayoutEntry {
            binding: 1 + 2 * unit,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        });
        entries.push(wgpu::BindGroupLayoutEntry {
            binding: 2 + 2 * unit,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        });
    }

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(info.name.as_str()),
        entries: &entries,
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(info.name.as_str()),
        bind_group_layouts: &[&bind_group_layout],
        push_constant_ranges: &[],
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(info.name.as_str()),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: target,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    });

    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        return Err(BloomError::ProgramLoad {
            name: info.name,
            reason: err.to_string(),
        });
    }

    Ok(WgpuProgram {
        inner: Arc::new(CompiledProgram {
            info,
            pipeline,
            bind_group_layout,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered() {
        let library = ProgramLibrary::new();
        for name in [EXTRACT_PROGRAM, BLUR_PROGRAM, COMBINE_PROGRAM] {
            assert!(library.sources.contains_key(name), "{name} missing");
        }
        assert!(!library.sources.contains_key("tone_map"));
    }

    #[test]
    fn builtin_sources_reflect_with_fullscreen_prefix() {
        let library = ProgramLibrary::new();
        for (name, source) in &library.sources {
            let full = format!("{FULLSCREEN_WGSL}\n{source}");
            let info = reflect_program(name, &full).unwrap();
            assert!(info.texture_inputs <= MAX_TEXTURE_UNITS);
        }
    }
}
