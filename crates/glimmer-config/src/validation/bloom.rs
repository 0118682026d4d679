//! Bloom section validation.

use crate::schema::GlimmerConfig;

use super::helpers::{validate_optional_f32, validate_range};

const MAX_INTENSITY: f32 = 10.0;

/// Validate scale factor and preset overrides.
pub(crate) fn validate_bloom(errors: &mut Vec<String>, config: &GlimmerConfig) {
    let bloom = &config.bloom;

    validate_range(errors, "bloom.scale_factor", bloom.scale_factor, 1, 8);

    // Threshold 1.0 would divide by zero in the extract program.
    if let Some(t) = bloom.threshold {
        if !t.is_finite() || !(0.0..1.0).contains(&t) {
            errors.push(format!("bloom.threshold = {t} is out of range [0, 1)"));
        }
    }

    // The spread is a divisor in the gaussian.
    if let Some(b) = bloom.blur_amount {
        if !b.is_finite() || b <= 0.0 || b > 100.0 {
            errors.push(format!("bloom.blur_amount = {b} is out of range (0, 100]"));
        }
    }

    let overrides = [
        ("bloom.bloom_intensity", bloom.bloom_intensity),
        ("bloom.base_intensity", bloom.base_intensity),
        ("bloom.bloom_saturation", bloom.bloom_saturation),
        ("bloom.base_saturation", bloom.base_saturation),
    ];
    for (name, value) in overrides {
        validate_optional_f32(errors, name, value, 0.0, MAX_INTENSITY);
    }
}
