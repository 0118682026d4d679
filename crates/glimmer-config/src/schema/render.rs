//! Rendering backend and logging configuration types.

use glimmer_common::ColorFormat;
use serde::{Deserialize, Serialize};

/// Which backend executes the bloom passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Headless wgpu device.
    #[default]
    Gpu,
    /// Software reference rasterizer.
    Cpu,
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gpu" => Ok(BackendKind::Gpu),
            "cpu" => Ok(BackendKind::Cpu),
            other => Err(format!("unknown backend '{other}' (expected gpu or cpu)")),
        }
    }
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub backend: BackendKind,
    /// Format of the host back buffer; intermediate surfaces match it.
    pub back_buffer_format: ColorFormat,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Gpu,
            back_buffer_format: ColorFormat::Rgba8Unorm,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_config_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.backend, BackendKind::Gpu);
        assert_eq!(config.back_buffer_format, ColorFormat::Rgba8Unorm);
    }

    #[test]
    fn backend_kind_from_str() {
        assert_eq!("CPU".parse::<BackendKind>(), Ok(BackendKind::Cpu));
        assert_eq!("gpu".parse::<BackendKind>(), Ok(BackendKind::Gpu));
        assert!("vulkan".parse::<BackendKind>().is_err());
    }

    #[test]
    fn logging_config_partial_toml() {
        let config: LoggingConfig = toml::from_str(r#"level = "warn""#).unwrap();
        assert_eq!(config.level, "warn");
    }
}
