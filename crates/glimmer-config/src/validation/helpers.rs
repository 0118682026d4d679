//! Shared range-validation helpers used by all domain validators.

/// Push an error if `value` is outside `[min, max]` (integer).
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if an optional override is outside `[min, max]` or not finite.
pub(crate) fn validate_optional_f32(
    errors: &mut Vec<String>,
    name: &str,
    value: Option<f32>,
    min: f32,
    max: f32,
) {
    if let Some(v) = value {
        if !v.is_finite() || v < min || v > max {
            errors.push(format!("{name} = {v} is out of range [{min}, {max}]"));
        }
    }
}
