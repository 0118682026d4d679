//! Bloom parameter bundles and the named preset table.

use glimmer_config::schema::{BloomConfig, BloomPreset};

use crate::error::BloomError;

/// Immutable bloom parameters.
///
/// Built from a [`BloomPreset`] or validated through [`BloomSettings::new`];
/// the owner swaps the whole value rather than mutating fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomSettings {
    threshold: f32,
    blur_amount: f32,
    bloom_intensity: f32,
    base_intensity: f32,
    bloom_saturation: f32,
    base_saturation: f32,
}

impl BloomSettings {
    /// Create settings, rejecting a non-positive spread or a threshold outside `[0, 1)`.
    pub fn new(
        threshold: f32,
        blur_amount: f32,
        bloom_intensity: f32,
        base_intensity: f32,
        bloom_saturation: f32,
        base_saturation: f32,
    ) -> Result<Self, BloomError> {
        if !blur_amount.is_finite() || blur_amount <= 0.0 {
            return Err(BloomError::InvalidSettings(format!(
                "blur_amount must be positive, got {blur_amount}"
            )));
        }
        if !threshold.is_finite() || !(0.0..1.0).contains(&threshold) {
            return Err(BloomError::InvalidSettings(format!(
                "threshold must be in [0, 1), got {threshold}"
            )));
        }
        let rest = [
            ("bloom_intensity", bloom_intensity),
            ("base_intensity", base_intensity),
            ("bloom_saturation", bloom_saturation),
            ("base_saturation", base_saturation),
        ];
        if let Some((name, value)) = rest.iter().find(|(_, v)| !v.is_finite()) {
            return Err(BloomError::InvalidSettings(format!(
                "{name} must be finite, got {value}"
            )));
        }

        Ok(Self {
            threshold,
            blur_amount,
            bloom_intensity,
            base_intensity,
            bloom_saturation,
            base_saturation,
        })
    }

    /// Settings for a named preset.
    pub const fn preset(preset: BloomPreset) -> Self {
        let (
            threshold,
            blur_amount,
            bloom_intensity,
            base_intensity,
            bloom_saturation,
            base_saturation,
        ) = match preset {
            BloomPreset::Default => (0.25, 4.0, 1.25, 1.0, 1.0, 1.0),
            BloomPreset::Soft => (0.0, 3.0, 1.0, 1.0, 1.0, 1.0),
            BloomPreset::Desaturated => (0.5, 8.0, 2.0, 1.0, 0.0, 1.0),
            BloomPreset::Saturated => (0.25, 4.0, 2.0, 1.0, 2.0, 0.0),
            BloomPreset::Blurry => (0.0, 2.0, 1.0, 0.1, 1.0, 1.0),
            BloomPreset::Subtle => (0.5, 2.0, 1.0, 1.0, 1.0, 1.0),
        };
        Self {
            threshold,
            blur_amount,
            bloom_intensity,
            base_intensity,
            bloom_saturation,
            base_saturation,
        }
    }

    /// Preset selected by the config, with any per-field overrides applied.
    pub fn from_config(config: &BloomConfig) -> Result<Self, BloomError> {
        let base = Self::preset(config.preset);
        Self::new(
            config.threshold.unwrap_or(base.threshold),
            config.blur_amount.unwrap_or(base.blur_amount),
            config.bloom_intensity.unwrap_or(base.bloom_intensity),
            config.base_intensity.unwrap_or(base.base_intensity),
            config.bloom_saturation.unwrap_or(base.bloom_saturation),
            config.base_saturation.unwrap_or(base.base_saturation),
        )
    }

    /// Brightness cut-off used by the extract pass.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Gaussian spread; always positive.
    pub fn blur_amount(&self) -> f32 {
        self.blur_amount
    }

    pub fn bloom_intensity(&self) -> f32 {
        self.bloom_intensity
    }

    pub fn base_intensity(&self) -> f32 {
        self.base_intensity
    }

    pub fn bloom_saturation(&self) -> f32 {
        self.bloom_saturation
    }

    pub fn base_saturation(&self) -> f32 {
        self.base_saturation
    }
}

impl Default for BloomSettings {
    fn default() -> Self {
        Self::preset(BloomPreset::default())
    }
}

impl From<BloomPreset> for BloomSettings {
    fn from(preset: BloomPreset) -> Self {
        Self::preset(preset)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_saturated_preset() {
        let s = BloomSettings::default();
        assert_eq!(s, BloomSettings::preset(BloomPreset::Saturated));
        assert!((s.threshold() - 0.25).abs() < f32::EPSILON);
        assert!((s.blur_amount() - 4.0).abs() < f32::EPSILON);
        assert!((s.bloom_intensity() - 2.0).abs() < f32::EPSILON);
        assert!((s.base_intensity() - 1.0).abs() < f32::EPSILON);
        assert!((s.bloom_saturation() - 2.0).abs() < f32::EPSILON);
        assert!((s.base_saturation() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn every_preset_passes_validation() {
        for preset in BloomPreset::ALL {
            let s = BloomSettings::preset(preset);
            let rebuilt = BloomSettings::new(
                s.threshold(),
                s.blur_amount(),
                s.bloom_intensity(),
                s.base_intensity(),
                s.bloom_saturation(),
                s.base_saturation(),
            )
            .unwrap();
            assert_eq!(rebuilt, s, "{preset}");
        }
    }

    #[test]
    fn rejects_non_positive_blur_amount() {
        assert!(matches!(
            BloomSettings::new(0.25, 0.0, 1.0, 1.0, 1.0, 1.0),
            Err(BloomError::InvalidSettings(_))
        ));
        assert!(BloomSettings::new(0.25, -1.0, 1.0, 1.0, 1.0, 1.0).is_err());
        assert!(BloomSettings::new(0.25, f32::INFINITY, 1.0, 1.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn rejects_threshold_of_one() {
        assert!(BloomSettings::new(1.0, 4.0, 1.0, 1.0, 1.0, 1.0).is_err());
        assert!(BloomSettings::new(-0.1, 4.0, 1.0, 1.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn rejects_nan_intensity() {
        let err = BloomSettings::new(0.2, 4.0, f32::NAN, 1.0, 1.0, 1.0).unwrap_err();
        assert!(err.to_string().contains("bloom_intensity"));
    }

    #[test]
    fn from_config_applies_overrides() {
        let config = BloomConfig {
            preset: BloomPreset::Desaturated,
            blur_amount: Some(6.0),
            base_saturation: Some(0.5),
            ..Default::default()
        };
        let s = BloomSettings::from_config(&config).unwrap();
        assert!((s.threshold() - 0.5).abs() < f32::EPSILON);
        assert!((s.blur_amount() - 6.0).abs() < f32::EPSILON);
        assert!((s.bloom_intensity() - 2.0).abs() < f32::EPSILON);
        assert!((s.base_saturation() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn from_config_rejects_bad_override() {
        let config = BloomConfig {
            blur_amount: Some(-3.0),
            ..Default::default()
        };
        assert!(BloomSettings::from_config(&config).is_err());
    }
}
