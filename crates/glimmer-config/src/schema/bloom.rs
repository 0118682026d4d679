//! Bloom effect configuration types.
//!
//! A bloom look is picked from a small set of named presets; any of the six
//! numeric parameters may then be overridden individually.

use serde::{Deserialize, Serialize};

/// Named bloom looks, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BloomPreset {
    Default,
    Soft,
    Desaturated,
    #[default]
    Saturated,
    Blurry,
    Subtle,
}

impl BloomPreset {
    /// Every preset in table order.
    pub const ALL: [BloomPreset; 6] = [
        BloomPreset::Default,
        BloomPreset::Soft,
        BloomPreset::Desaturated,
        BloomPreset::Saturated,
        BloomPreset::Blurry,
        BloomPreset::Subtle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BloomPreset::Default => "default",
            BloomPreset::Soft => "soft",
            BloomPreset::Desaturated => "desaturated",
            BloomPreset::Saturated => "saturated",
            BloomPreset::Blurry => "blurry",
            BloomPreset::Subtle => "subtle",
        }
    }

    /// Position of this preset in [`Self::ALL`].
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    /// Look up a preset by table position. Out-of-range indices yield `None`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for BloomPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for BloomPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|p| p.name()).collect();
                format!("unknown bloom preset '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

/// Bloom configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomConfig {
    /// Base look.
    pub preset: BloomPreset,
    /// Intermediate surface size multiplier (valid range: 1-8).
    pub scale_factor: u32,
    /// Brightness cut-off for the extract pass (valid range: 0.0-<1.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f32>,
    /// Gaussian spread (valid range: >0.0-100.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur_amount: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bloom_intensity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_intensity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bloom_saturation: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_saturation: Option<f32>,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            preset: BloomPreset::default(),
            scale_factor: 1,
            threshold: None,
            blur_amount: None,
            bloom_intensity: None,
            base_intensity: None,
            bloom_saturation: None,
            base_saturation: None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preset_is_fourth_entry() {
        assert_eq!(BloomPreset::default(), BloomPreset::Saturated);
        assert_eq!(BloomPreset::default().index(), 3);
    }

    #[test]
    fn from_index_is_checked() {
        assert_eq!(BloomPreset::from_index(0), Some(BloomPreset::Default));
        assert_eq!(BloomPreset::from_index(5), Some(BloomPreset::Subtle));
        assert_eq!(BloomPreset::from_index(6), None);
    }

    #[test]
    fn parse_preset_names() {
        assert_eq!("soft".parse::<BloomPreset>(), Ok(BloomPreset::Soft));
        assert_eq!(" Desaturated ".parse::<BloomPreset>(), Ok(BloomPreset::Desaturated));
        let err = "neon".parse::<BloomPreset>().unwrap_err();
        assert!(err.contains("neon"));
        assert!(err.contains("subtle"));
    }

    #[test]
    fn bloom_config_partial_toml() {
        let toml_str = r#"
preset = "soft"
blur_amount = 6.0
"#;
        let config: BloomConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.preset, BloomPreset::Soft);
        assert_eq!(config.blur_amount, Some(6.0));
        assert_eq!(config.threshold, None);
        assert_eq!(config.scale_factor, 1); // default preserved
    }

    #[test]
    fn unknown_preset_is_a_parse_error() {
        let result: Result<BloomConfig, _> = toml::from_str(r#"preset = "neon""#);
        assert!(result.is_err());
    }

    #[test]
    fn overrides_are_omitted_when_unset() {
        let json = serde_json::to_string(&BloomConfig::default()).unwrap();
        assert!(!json.contains("threshold"));
        assert!(json.contains("\"scale_factor\":1"));
    }
}
