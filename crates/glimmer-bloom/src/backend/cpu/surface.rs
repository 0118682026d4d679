//! Software color surfaces.

use glimmer_common::{ColorFormat, PhysicalSize};

use crate::backend::SurfaceHandle;

/// RGBA pixels stored as `f32`, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuSurface {
    size: PhysicalSize,
    format: ColorFormat,
    pixels: Vec<[f32; 4]>,
}

impl CpuSurface {
    /// A surface cleared to transparent black.
    pub fn new(width: u32, height: u32, format: ColorFormat) -> Self {
        Self::solid(width, height, format, [0.0; 4])
    }

    pub fn solid(width: u32, height: u32, format: ColorFormat, color: [f32; 4]) -> Self {
        let size = PhysicalSize::new(width, height);
        let color = quantize(format, color);
        Self {
            size,
            format,
            pixels: vec![color; size.area()],
        }
    }

    /// Build a surface from explicit pixels; `None` if the count does not match.
    pub fn from_pixels(
        width: u32,
        height: u32,
        format: ColorFormat,
        pixels: Vec<[f32; 4]>,
    ) -> Option<Self> {
        let size = PhysicalSize::new(width, height);
        if pixels.len() != size.area() {
            return None;
        }
        let pixels = pixels.into_iter().map(|p| quantize(format, p)).collect();
        Some(Self {
            size,
            format,
            pixels,
        })
    }

    pub fn from_image(image: &image::RgbaImage, format: ColorFormat) -> Self {
        let pixels = image
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                [
                    f32::from(r) / 255.0,
                    f32::from(g) / 255.0,
                    f32::from(b) / 255.0,
                    f32::from(a) / 255.0,
                ]
            })
            .map(|p| quantize(format, p))
            .collect();
        Self {
            size: PhysicalSize::new(image.width(), image.height()),
            format,
            pixels,
        }
    }

    /// Convert to 8-bit RGBA, clamping out-of-range values.
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.size.width, self.size.height, |x, y| {
            let p = self.pixel(x, y);
            image::Rgba(p.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        self.pixels[self.index(x, y)]
    }

    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    pub(crate) fn write(&mut self, x: u32, y: u32, color: [f32; 4]) {
        let i = self.index(x, y);
        self.pixels[i] = quantize(self.format, color);
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.size.width as usize + x as usize
    }
}

impl SurfaceHandle for CpuSurface {
    fn size(&self) -> PhysicalSize {
        self.size
    }

    fn format(&self) -> ColorFormat {
        self.format
    }
}

/// Apply the storage precision of `format` to a color.
fn quantize(format: ColorFormat, color: [f32; 4]) -> [f32; 4] {
    if format.is_unorm8() {
        color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() / 255.0)
    } else {
        color
    }
}
