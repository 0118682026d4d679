//! Separable gaussian filter coefficients for the blur program.
//!
//! Tap 0 is the centre sample. The remaining taps come in mirrored pairs
//! `(2i + 1, 2i + 2)` sharing one weight. Each pair sits `2i + 1.5` texels
//! from the centre so a single bilinear fetch averages two neighbouring
//! texels, which doubles the kernel width covered per shader sample.

use crate::error::BloomError;
use crate::settings::BloomSettings;

/// Weights and texel offsets for one blur direction.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    pub weights: Vec<f32>,
    pub offsets: Vec<[f32; 2]>,
}

impl FilterCoefficients {
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Check that a declared sample capacity is one centre tap plus whole pairs.
pub fn validate_sample_count(sample_count: usize) -> Result<(), BloomError> {
    if sample_count % 2 == 1 {
        Ok(())
    } else {
        Err(BloomError::InvalidSampleCapacity(sample_count))
    }
}

/// Unnormalized gaussian density at offset `n` for spread `theta`.
fn gaussian(n: f64, theta: f64) -> f64 {
    (1.0 / (2.0 * std::f64::consts::PI * theta).sqrt()) * (-(n * n) / (2.0 * theta * theta)).exp()
}

/// Compute normalized blur taps stepping by `(step_x, step_y)` per texel.
///
/// Weights depend only on `settings.blur_amount()`; the step selects the
/// direction and texel size. Arithmetic runs in `f64` and is narrowed once.
pub fn compute_blur_parameters(
    step_x: f32,
    step_y: f32,
    settings: &BloomSettings,
    sample_count: usize,
) -> Result<FilterCoefficients, BloomError> {
    validate_sample_count(sample_count)?;

    let theta = f64::from(settings.blur_amount());
    let step = [f64::from(step_x), f64::from(step_y)];

    let mut weights = vec![0.0f64; sample_count];
    let mut offsets = vec![[0.0f64; 2]; sample_count];

    weights[0] = gaussian(0.0, theta);
    let mut total_weight = weights[0];

    for i in 0..sample_count / 2 {
        let weight = gaussian((i + 1) as f64, theta);
        weights[i * 2 + 1] = weight;
        weights[i * 2 + 2] = weight;
        total_weight += weight * 2.0;

        let sample_offset = i as f64 * 2.0 + 1.5;
        let delta = [step[0] * sample_offset, step[1] * sample_offset];
        offsets[i * 2 + 1] = delta;
        offsets[i * 2 + 2] = [-delta[0], -delta[1]];
    }

    Ok(FilterCoefficients {
        weights: weights.iter().map(|w| (w / total_weight) as f32).collect(),
        offsets: offsets
            .iter()
            .map(|[x, y]| [*x as f32, *y as f32])
            .collect(),
    })
}

// =============================================================================
// Tests
// =============================================================================
