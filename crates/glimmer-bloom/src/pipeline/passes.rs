use glimmer_common::PhysicalSize;

use super::BloomPipeline;
use crate::backend::{
    ProgramParameters, RenderBackend, SamplerState, SurfaceHandle, PARAM_BASE_INTENSITY,
    PARAM_BASE_SATURATION, PARAM_BLOOM_INTENSITY, PARAM_BLOOM_SATURATION, PARAM_SAMPLE_OFFSETS,
    PARAM_SAMPLE_WEIGHTS, PARAM_THRESHOLD,
};
use crate::error::BloomError;
use crate::filter::{compute_blur_parameters, FilterCoefficients};

/// Texture unit the combine pass samples the original scene from.
const BASE_TEXTURE_UNIT: usize = 1;

impl<B: RenderBackend> BloomPipeline<B> {
    /// Run all four passes, reading `source` and writing `destination`.
    ///
    /// Surfaces are allocated from the destination size if the host has not
    /// reported a resolution yet, and reallocated if the scale factor or
    /// back-buffer format changed since.
    pub fn process(
        &mut self,
        backend: &mut B,
        source: &B::Surface,
        destination: &mut B::Surface,
    ) -> Result<(), BloomError> {
        if self.programs.is_none() {
            return Err(BloomError::NotAttached);
        }
        self.ensure_surfaces(backend, destination.size())?;

        let (Some(programs), Some(surfaces)) = (self.programs.as_ref(), self.surfaces.as_mut())
        else {
            return Err(BloomError::NotAttached);
        };
        let settings = &self.settings;

        backend.set_sampler_state(BASE_TEXTURE_UNIT, SamplerState::LINEAR_CLAMP);

        // Pass 1: bright areas of the scene -> A
        run_pass(backend, &[source], &mut surfaces.a, &programs.extract, |p| {
            p.set_float(PARAM_THRESHOLD, settings.threshold());
        })?;

        // Pass 2: horizontal blur A -> B
        let size = surfaces.a.size();
        let horizontal = compute_blur_parameters(
            1.0 / size.width as f32,
            0.0,
            settings,
            programs.blur_samples,
        )?;
        run_pass(backend, &[&surfaces.a], &mut surfaces.b, &programs.blur, |p| {
            bind_filter(p, &horizontal);
        })?;

        // Pass 3: vertical blur B -> A
        let vertical = compute_blur_parameters(
            0.0,
            1.0 / size.height as f32,
            settings,
            programs.blur_samples,
        )?;
        run_pass(backend, &[&surfaces.b], &mut surfaces.a, &programs.blur, |p| {
            bind_filter(p, &vertical);
        })?;

        // Pass 4: bloom (A) over the original scene -> destination
        run_pass(
            backend,
            &[&surfaces.a, source],
            destination,
            &programs.combine,
            |p| {
                p.set_float(PARAM_BLOOM_INTENSITY, settings.bloom_intensity());
                p.set_float(PARAM_BASE_INTENSITY, settings.base_intensity());
                p.set_float(PARAM_BLOOM_SATURATION, settings.bloom_saturation());
                p.set_float(PARAM_BASE_SATURATION, settings.base_saturation());
            },
        )?;

        tracing::trace!("bloom frame processed at {size}");
        Ok(())
    }

    /// Make sure the surfaces match the current resolution, scale factor
    /// and back-buffer format.
    fn ensure_surfaces(
        &mut self,
        backend: &mut B,
        fallback: PhysicalSize,
    ) -> Result<(), BloomError> {
        let output = self.resolution.unwrap_or(fallback);
        let expected = self.scaled_size(output)?;
        let format = backend.back_buffer_format();

        let up_to_date = self
            .surfaces
            .as_ref()
            .is_some_and(|s| s.size() == expected && s.format() == format);
        if !up_to_date {
            self.on_resolution_changed(backend, output.width, output.height)?;
        }
        Ok(())
    }
}

/// Bind `program` with parameters filled in by `set_params` and draw one
/// fullscreen quad from `inputs` into `output`.
fn run_pass<B: RenderBackend>(
    backend: &mut B,
    inputs: &[&B::Surface],
    output: &mut B::Surface,
    program: &B::Program,
    set_params: impl FnOnce(&mut ProgramParameters),
) -> Result<(), BloomError> {
    let mut params = ProgramParameters::new();
    set_params(&mut params);
    backend.draw_fullscreen_quad(inputs, output, program, &params)
}

fn bind_filter(params: &mut ProgramParameters, filter: &FilterCoefficients) {
    params.set_floats(PARAM_SAMPLE_WEIGHTS, &filter.weights);
    params.set_vec2s(PARAM_SAMPLE_OFFSETS, &filter.offsets);
}
