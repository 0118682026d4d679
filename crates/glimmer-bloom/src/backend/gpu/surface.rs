//! Offscreen color targets and CPU <-> GPU image transfer.

use glimmer_common::{ColorFormat, PhysicalSize};
use image::RgbaImage;

use super::GpuContext;
use crate::backend::SurfaceHandle;
use crate::error::BloomError;

/// Texture + view pair usable as a pass input and as a render target.
pub struct WgpuSurface {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: PhysicalSize,
    format: ColorFormat,
}

impl WgpuSurface {
    pub(crate) fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        format: ColorFormat,
        label: &str,
    ) -> Result<Self, BloomError> {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: texture_format(format)?,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Ok(Self {
            texture,
            view,
            size: PhysicalSize::new(width, height),
            format,
        })
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Overwrite the whole surface with `image`, which must match its size.
    pub fn upload(&self, queue: &wgpu::Queue, image: &RgbaImage) -> Result<(), BloomError> {
        if image.dimensions() != (self.size.width, self.size.height) {
            return Err(BloomError::InvalidResolution {
                width: image.width(),
                height: image.height(),
            });
        }
        let mut data = image.as_raw().clone();
        match self.format {
            ColorFormat::Rgba8Unorm => {}
            ColorFormat::Bgra8Unorm => swap_red_blue(&mut data),
            other => return Err(BloomError::UnsupportedFormat(other)),
        }

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.row_bytes()),
                rows_per_image: Some(self.size.height),
            },
            self.extent(),
        );
        Ok(())
    }

    /// Copy the surface back into host memory. Blocks until the GPU is done.
    pub fn read_back(&self, context: &GpuContext) -> Result<RgbaImage, BloomError> {
        if !self.format.is_unorm8() {
            return Err(BloomError::UnsupportedFormat(self.format));
        }

        let unpadded = self.row_bytes();
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded = unpadded.div_ceil(align) * align;

        let buffer = context.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("surface readback"),
            size: u64::from(padded) * u64::from(self.size.height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("surface readback encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(self.size.height),
                },
            },
            self.extent(),
        );
        context.queue.submit(Some(encoder.finish()));

        let slice = buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = context.device.poll(wgpu::Maintain::Wait);
        rx.recv()
            .map_err(|e| BloomError::Device(format!("readback channel closed: {e}")))?
            .map_err(|e| BloomError::Device(format!("failed to map readback buffer: {e}")))?;

        let mut pixels = Vec::with_capacity((unpadded * self.size.height) as usize);
        {
            let mapped = slice.get_mapped_range();
            for row in mapped.chunks(padded as usize) {
                pixels.extend_from_slice(&row[..unpadded as usize]);
            }
        }
        buffer.unmap();

        if self.format == ColorFormat::Bgra8Unorm {
            swap_red_blue(&mut pixels);
        }
        RgbaImage::from_raw(self.size.width, self.size.height, pixels)
            .ok_or_else(|| BloomError::Device("readback size mismatch".into()))
    }

    fn row_bytes(&self) -> u32 {
        self.format.bytes_per_pixel() * self.size.width
    }

    fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.size.width,
            height: self.size.height,
            depth_or_array_layers: 1,
        }
    }
}

impl SurfaceHandle for WgpuSurface {
    fn size(&self) -> PhysicalSize {
        self.size
    }

    fn format(&self) -> ColorFormat {
        self.format
    }
}

/// Map a surface format onto a filterable, renderable texture format.
pub(crate) fn texture_format(format: ColorFormat) -> Result<wgpu::TextureFormat, BloomError> {
    match format {
        ColorFormat::Rgba8Unorm => Ok(wgpu::TextureFormat::Rgba8Unorm),
        ColorFormat::Bgra8Unorm => Ok(wgpu::TextureFormat::Bgra8Unorm),
        ColorFormat::Rgba16Float => Ok(wgpu::TextureFormat::Rgba16Float),
        // Not filterable without an optional device feature.
        ColorFormat::Rgba32Float => Err(BloomError::UnsupportedFormat(format)),
    }
}

fn swap_red_blue(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        px.swap(0, 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float32_is_rejected() {
        assert!(matches!(
            texture_format(ColorFormat::Rgba32Float),
            Err(BloomError::UnsupportedFormat(ColorFormat::Rgba32Float))
        ));
    }

    #[test]
    fn renderable_formats_map_directly() {
        assert_eq!(
            texture_format(ColorFormat::Rgba8Unorm).unwrap(),
            wgpu::TextureFormat::Rgba8Unorm
        );
        assert_eq!(
            texture_format(ColorFormat::Bgra8Unorm).unwrap(),
            wgpu::TextureFormat::Bgra8Unorm
        );
        assert_eq!(
            texture_format(ColorFormat::Rgba16Float).unwrap(),
            wgpu::TextureFormat::Rgba16Float
        );
    }

    #[test]
    fn swap_red_blue_swizzles_each_pixel() {
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8];
        swap_red_blue(&mut data);
        assert_eq!(data, vec![3, 2, 1, 4, 7, 6, 5, 8]);
    }
}
