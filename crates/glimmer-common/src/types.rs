//! Value types shared by the config and bloom crates.

use serde::{Deserialize, Serialize};

/// Physical pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl std::fmt::Display for PhysicalSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Pixel format of a color surface.
///
/// Intermediate bloom surfaces always take the host's back-buffer format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorFormat {
    #[default]
    Rgba8Unorm,
    Bgra8Unorm,
    Rgba16Float,
    Rgba32Float,
}

impl ColorFormat {
    /// Bytes per pixel.
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            ColorFormat::Rgba8Unorm | ColorFormat::Bgra8Unorm => 4,
            ColorFormat::Rgba16Float => 8,
            ColorFormat::Rgba32Float => 16,
        }
    }

    /// Whether stored values are clamped to `[0, 1]` and quantized to 8 bits.
    pub fn is_unorm8(&self) -> bool {
        matches!(self, ColorFormat::Rgba8Unorm | ColorFormat::Bgra8Unorm)
    }
}

impl std::fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ColorFormat::Rgba8Unorm => "rgba8-unorm",
            ColorFormat::Bgra8Unorm => "bgra8-unorm",
            ColorFormat::Rgba16Float => "rgba16-float",
            ColorFormat::Rgba32Float => "rgba32-float",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_size_copy_and_eq() {
        let a = PhysicalSize::new(800, 600);
        let b = a;
        assert_eq!(a, b);
        assert_eq!(a.area(), 480_000);
        assert_eq!(a.to_string(), "800x600");
    }

    #[test]
    fn color_format_bytes_per_pixel() {
        assert_eq!(ColorFormat::Rgba8Unorm.bytes_per_pixel(), 4);
        assert_eq!(ColorFormat::Rgba16Float.bytes_per_pixel(), 8);
        assert_eq!(ColorFormat::Rgba32Float.bytes_per_pixel(), 16);
        assert!(ColorFormat::Bgra8Unorm.is_unorm8());
        assert!(!ColorFormat::Rgba16Float.is_unorm8());
    }

    #[derive(Deserialize)]
    struct Wrapper {
        format: ColorFormat,
    }

    #[test]
    fn color_format_kebab_case_in_toml() {
        let w: Wrapper = toml::from_str(r#"format = "rgba16-float""#).unwrap();
        assert_eq!(w.format, ColorFormat::Rgba16Float);
        assert_eq!(w.format.to_string(), "rgba16-float");
    }
}
