//! Host notifications: attach, program reload, resize, detach.

use glimmer_common::PhysicalSize;

use super::{BloomPipeline, BloomPrograms, SurfacePair};
use crate::backend::{
    ProgramHandle, RenderBackend, BLUR_PROGRAM, COMBINE_PROGRAM, EXTRACT_PROGRAM,
    PARAM_SAMPLE_OFFSETS, PARAM_SAMPLE_WEIGHTS,
};
use crate::error::BloomError;
use crate::filter::validate_sample_count;

impl<B: RenderBackend> BloomPipeline<B> {
    /// Resolve the three programs. Any failure leaves the pipeline detached.
    pub fn on_attached(&mut self, backend: &mut B) -> Result<(), BloomError> {
        self.programs = None;
        let programs = resolve_programs(backend)?;
        tracing::info!(
            "bloom pipeline attached ({} blur taps, scale factor {})",
            programs.blur_samples,
            self.scale_factor
        );
        self.programs = Some(programs);
        Ok(())
    }

    /// Re-resolve the programs after the host reloaded them.
    pub fn on_programs_reloaded(&mut self, backend: &mut B) -> Result<(), BloomError> {
        self.programs = None;
        match resolve_programs(backend) {
            Ok(programs) => {
                tracing::debug!("bloom programs reloaded");
                self.programs = Some(programs);
                Ok(())
            }
            Err(e) => {
                tracing::error!("bloom program reload failed: {e}");
                Err(e)
            }
        }
    }

    /// Replace both intermediate surfaces with ones sized for a
    /// `width` x `height` output. Invalid sizes keep the current surfaces.
    pub fn on_resolution_changed(
        &mut self,
        backend: &mut B,
        width: u32,
        height: u32,
    ) -> Result<(), BloomError> {
        let output = PhysicalSize::new(width, height);
        let size = self.scaled_size(output)?;
        let format = backend.back_buffer_format();
        let pair = SurfacePair::allocate(backend, size, format)?;

        if let Some(old) = self.surfaces.replace(pair) {
            old.release(backend);
        }
        self.resolution = Some(output);
        tracing::debug!("bloom resolution changed to {output} (surfaces {size})");
        Ok(())
    }

    /// Release the intermediate surfaces and forget the program handles.
    pub fn on_detached(&mut self, backend: &mut B) {
        if let Some(surfaces) = self.surfaces.take() {
            surfaces.release(backend);
        }
        self.programs = None;
        self.resolution = None;
        tracing::debug!("bloom pipeline detached");
    }
}

fn resolve_programs<B: RenderBackend>(
    backend: &mut B,
) -> Result<BloomPrograms<B::Program>, BloomError> {
    let extract = backend.load_program(EXTRACT_PROGRAM)?;
    let blur = backend.load_program(BLUR_PROGRAM)?;
    let combine = backend.load_program(COMBINE_PROGRAM)?;

    expect_inputs(&extract, 1)?;
    expect_inputs(&blur, 1)?;
    expect_inputs(&combine, 2)?;

    let info = blur.info();
    let declared = |parameter: &str| {
        info.array_len(parameter)
            .ok_or_else(|| BloomError::MissingParameter {
                program: info.name.clone(),
                parameter: parameter.to_owned(),
            })
    };
    let blur_samples = declared(PARAM_SAMPLE_WEIGHTS)?;
    let offset_slots = declared(PARAM_SAMPLE_OFFSETS)?;
    if offset_slots < blur_samples {
        return Err(BloomError::SampleLayout {
            program: info.name.clone(),
            weights: blur_samples,
            offsets: offset_slots,
        });
    }
    validate_sample_count(blur_samples)?;

    Ok(BloomPrograms {
        extract,
        blur,
        combine,
        blur_samples,
    })
}

fn expect_inputs<P: ProgramHandle>(program: &P, expected: usize) -> Result<(), BloomError> {
    let info = program.info();
    if info.texture_inputs == expected {
        Ok(())
    } else {
        Err(BloomError::InputCount {
            program: info.name.clone(),
            expected,
            actual: info.texture_inputs,
        })
    }
}
