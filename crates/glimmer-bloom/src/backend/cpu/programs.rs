//! Per-pixel implementations of the three bloom programs.
//!
//! These mirror the WGSL programs in `src/shaders` and serve as the
//! reference when checking a GPU backend.

use std::sync::Arc;

use super::sampling::sample;
use super::surface::CpuSurface;
use crate::backend::{
    ParameterDecl, ProgramHandle, ProgramInfo, ProgramParameters, SamplerState, BLUR_PROGRAM,
    COMBINE_PROGRAM, EXTRACT_PROGRAM, PARAM_BASE_INTENSITY, PARAM_BASE_SATURATION,
    PARAM_BLOOM_INTENSITY, PARAM_BLOOM_SATURATION, PARAM_SAMPLE_OFFSETS, PARAM_SAMPLE_WEIGHTS,
    PARAM_THRESHOLD,
};
use crate::error::BloomError;

/// Luma weights used when desaturating.
const GREY_WEIGHTS: [f32; 3] = [0.3, 0.59, 0.11];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CpuProgramKind {
    Extract,
    Blur,
    Combine,
}

/// A software program shared between the backend's registry and the pipeline.
#[derive(Debug, Clone)]
pub struct CpuProgram {
    inner: Arc<(CpuProgramKind, ProgramInfo)>,
}

impl CpuProgram {
    pub(crate) fn extract() -> Self {
        Self::new(
            CpuProgramKind::Extract,
            EXTRACT_PROGRAM,
            vec![ParameterDecl::scalar(PARAM_THRESHOLD)],
            1,
        )
    }

    /// Gaussian program declaring `weight_slots` weights and `offset_slots` offsets.
    pub(crate) fn blur(weight_slots: usize, offset_slots: usize) -> Self {
        Self::new(
            CpuProgramKind::Blur,
            BLUR_PROGRAM,
            vec![
                ParameterDecl::array(PARAM_SAMPLE_WEIGHTS, weight_slots),
                ParameterDecl::array(PARAM_SAMPLE_OFFSETS, offset_slots),
            ],
            1,
        )
    }

    pub(crate) fn combine() -> Self {
        Self::new(
            CpuProgramKind::Combine,
            COMBINE_PROGRAM,
            vec![
                ParameterDecl::scalar(PARAM_BLOOM_INTENSITY),
                ParameterDecl::scalar(PARAM_BASE_INTENSITY),
                ParameterDecl::scalar(PARAM_BLOOM_SATURATION),
                ParameterDecl::scalar(PARAM_BASE_SATURATION),
            ],
            2,
        )
    }

    fn new(
        kind: CpuProgramKind,
        name: &str,
        parameters: Vec<ParameterDecl>,
        inputs: usize,
    ) -> Self {
        let info = ProgramInfo {
            name: name.to_owned(),
            parameters,
            texture_inputs: inputs,
        };
        Self {
            inner: Arc::new((kind, info)),
        }
    }

    pub(crate) fn kind(&self) -> CpuProgramKind {
        self.inner.0
    }
}

impl ProgramHandle for CpuProgram {
    fn info(&self) -> &ProgramInfo {
        &self.inner.1
    }
}

/// Per-pass inputs resolved from the bound parameters.
pub(crate) enum Shader<'a> {
    Extract {
        threshold: f32,
    },
    Blur {
        weights: &'a [f32],
        offsets: &'a [[f32; 2]],
    },
    Combine {
        bloom_intensity: f32,
        base_intensity: f32,
        bloom_saturation: f32,
        base_saturation: f32,
    },
}

impl<'a> Shader<'a> {
    pub(crate) fn bind(
        program: &CpuProgram,
        params: &'a ProgramParameters,
    ) -> Result<Self, BloomError> {
        let info = program.info();
        let missing = |parameter: &str| BloomError::MissingParameter {
            program: info.name.clone(),
            parameter: parameter.to_owned(),
        };
        let float = |name: &str| params.float(name).ok_or_else(|| missing(name));

        Ok(match program.kind() {
            CpuProgramKind::Extract => Shader::Extract {
                threshold: float(PARAM_THRESHOLD)?,
            },
            CpuProgramKind::Blur => {
                let weights = params
                    .floats(PARAM_SAMPLE_WEIGHTS)
                    .ok_or_else(|| missing(PARAM_SAMPLE_WEIGHTS))?;
                let offsets = params
                    .vec2s(PARAM_SAMPLE_OFFSETS)
                    .ok_or_else(|| missing(PARAM_SAMPLE_OFFSETS))?;
                let capacity = info.array_len(PARAM_SAMPLE_WEIGHTS).unwrap_or(0);
                if weights.len() != offsets.len() || weights.len() > capacity {
                    return Err(BloomError::InvalidSampleCapacity(weights.len()));
                }
                Shader::Blur { weights, offsets }
            }
            CpuProgramKind::Combine => Shader::Combine {
                bloom_intensity: float(PARAM_BLOOM_INTENSITY)?,
                base_intensity: float(PARAM_BASE_INTENSITY)?,
                bloom_saturation: float(PARAM_BLOOM_SATURATION)?,
                base_saturation: float(PARAM_BASE_SATURATION)?,
            },
        })
    }

    /// Shade one fragment at `uv`.
    pub(crate) fn shade(
        &self,
        inputs: &[&CpuSurface],
        samplers: &[SamplerState],
        uv: [f32; 2],
    ) -> [f32; 4] {
        let tex = |unit: usize, u: f32, v: f32| sample(inputs[unit], samplers[unit], u, v);

        match *self {
            Shader::Extract { threshold } => {
                let c = tex(0, uv[0], uv[1]);
                c.map(|x| ((x - threshold) / (1.0 - threshold)).clamp(0.0, 1.0))
            }
            Shader::Blur { weights, offsets } => {
                let mut acc = [0.0f32; 4];
                for (w, o) in weights.iter().zip(offsets) {
                    let c = tex(0, uv[0] + o[0], uv[1] + o[1]);
                    for (a, x) in acc.iter_mut().zip(c) {
                        *a += x * w;
                    }
                }
                acc
            }
            Shader::Combine {
                bloom_intensity,
                base_intensity,
                bloom_saturation,
                base_saturation,
            } => {
                let bloom = scale(
                    adjust_saturation(tex(0, uv[0], uv[1]), bloom_saturation),
                    bloom_intensity,
                );
                let base = scale(
                    adjust_saturation(tex(1, uv[0], uv[1]), base_saturation),
                    base_intensity,
                );
                combine(base, bloom)
            }
        }
    }
}

/// Blend `color` towards its grey value; 0 is greyscale, 1 is unchanged.
pub(crate) fn adjust_saturation(color: [f32; 4], saturation: f32) -> [f32; 4] {
    let grey = color[0] * GREY_WEIGHTS[0] + color[1] * GREY_WEIGHTS[1] + color[2] * GREY_WEIGHTS[2];
    color.map(|c| grey + (c - grey) * saturation)
}

/// Darken the base where bloom is bright, then add the bloom.
pub(crate) fn combine(base: [f32; 4], bloom: [f32; 4]) -> [f32; 4] {
    let mut out = [0.0; 4];
    for i in 0..4 {
        out[i] = base[i] * (1.0 - bloom[i].clamp(0.0, 1.0)) + bloom[i];
    }
    out
}

fn scale(color: [f32; 4], k: f32) -> [f32; 4] {
    color.map(|c| c * k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_saturation_is_grey() {
        let c = adjust_saturation([1.0, 0.0, 0.0, 1.0], 0.0);
        assert!((c[0] - 0.3).abs() < 1e-6);
        assert!((c[1] - 0.3).abs() < 1e-6);
        assert!((c[2] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn unit_saturation_is_identity() {
        let c = [0.2, 0.4, 0.8, 1.0];
        let out = adjust_saturation(c, 1.0);
        for (a, b) in c.iter().zip(out) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn combine_with_black_bloom_keeps_base() {
        let base = [0.1, 0.2, 0.3, 1.0];
        assert_eq!(combine(base, [0.0; 4]), base);
    }

    #[test]
    fn combine_with_saturated_bloom_replaces_base() {
        let out = combine([0.5; 4], [1.5; 4]);
        assert_eq!(out, [1.5; 4]);
    }

    #[test]
    fn blur_rejects_weights_beyond_capacity() {
        let program = CpuProgram::blur(3, 3);
        let mut params = ProgramParameters::new();
        params.set_floats(PARAM_SAMPLE_WEIGHTS, &[0.2; 5]);
        params.set_vec2s(PARAM_SAMPLE_OFFSETS, &[[0.0, 0.0]; 5]);
        assert!(Shader::bind(&program, &params).is_err());
    }

    #[test]
    fn extract_requires_threshold() {
        let program = CpuProgram::extract();
        let err = Shader::bind(&program, &ProgramParameters::new())
            .err()
            .unwrap();
        assert!(err.to_string().contains(PARAM_THRESHOLD));
    }
}
