//! Tests that need a wgpu adapter. Each one returns early when the machine
//! has none, hardware or software.

use glimmer_common::ColorFormat;
use image::{Rgba, RgbaImage};

use super::*;
use crate::backend::cpu::{CpuBackend, CpuSurface};
use crate::backend::BLUR_PROGRAM;
use crate::pipeline::BloomPipeline;

/// Largest per-channel difference allowed between the wgpu and software
/// results, in 8-bit steps. Hardware bilinear filtering uses fixed-point
/// weights.
const MAX_CHANNEL_DIFF: u8 = 6;

fn context() -> Option<GpuContext> {
    match pollster::block_on(GpuContext::headless()) {
        Ok(context) => Some(context),
        Err(BloomError::AdapterNotFound) => {
            eprintln!("no wgpu adapter available, skipping");
            None
        }
        Err(e) => panic!("failed to create headless context: {e}"),
    }
}

fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / (width - 1)) as u8;
        let g = (y * 255 / (height - 1)) as u8;
        Rgba([r, g, 255 - r, 255])
    })
}

fn max_channel_diff(a: &RgbaImage, b: &RgbaImage) -> u8 {
    assert_eq!(a.dimensions(), b.dimensions());
    a.as_raw()
        .iter()
        .zip(b.as_raw())
        .map(|(x, y)| x.abs_diff(*y))
        .max()
        .unwrap_or(0)
}

fn software_bloom(image: &RgbaImage) -> RgbaImage {
    let mut backend = CpuBackend::new();
    let source = CpuSurface::from_image(image, ColorFormat::Rgba8Unorm);
    let mut destination = CpuSurface::new(image.width(), image.height(), ColorFormat::Rgba8Unorm);

    let mut pipeline = BloomPipeline::default();
    pipeline.on_attached(&mut backend).unwrap();
    pipeline
        .on_resolution_changed(&mut backend, image.width(), image.height())
        .unwrap();
    pipeline
        .process(&mut backend, &source, &mut destination)
        .unwrap();
    destination.to_image()
}

fn gpu_frame(
    backend: &mut WgpuBackend,
    pipeline: &mut BloomPipeline<WgpuBackend>,
    image: &RgbaImage,
) -> RgbaImage {
    let source = backend.upload_image(image).unwrap();
    let format = backend.back_buffer_format();
    let mut destination = backend
        .create_surface(image.width(), image.height(), format)
        .unwrap();
    pipeline
        .process(backend, &source, &mut destination)
        .unwrap();
    backend.read_surface(&destination).unwrap()
}

#[test]
fn gpu_pipeline_matches_software_backend() {
    let Some(context) = context() else { return };
    let image = gradient(16, 8);

    let mut backend = WgpuBackend::new(context, ColorFormat::Rgba8Unorm).unwrap();
    let mut pipeline = BloomPipeline::default();
    pipeline.on_attached(&mut backend).unwrap();
    pipeline.on_resolution_changed(&mut backend, 16, 8).unwrap();

    let gpu = gpu_frame(&mut backend, &mut pipeline, &image);
    let cpu = software_bloom(&image);
    let diff = max_channel_diff(&gpu, &cpu);
    assert!(diff <= MAX_CHANNEL_DIFF, "max channel diff {diff}");

    pipeline.on_detached(&mut backend);
}

#[test]
fn reloaded_programs_render_the_same_frame() {
    let Some(context) = context() else { return };
    let image = gradient(16, 8);

    let mut backend = WgpuBackend::new(context, ColorFormat::Rgba8Unorm).unwrap();
    let mut pipeline = BloomPipeline::default();
    pipeline.on_attached(&mut backend).unwrap();
    let before = gpu_frame(&mut backend, &mut pipeline, &image);

    backend.invalidate_programs();
    pipeline.on_programs_reloaded(&mut backend).unwrap();
    assert!(pipeline.is_attached());
    let after = gpu_frame(&mut backend, &mut pipeline, &image);

    assert_eq!(before, after);
}

#[test]
fn broken_program_source_detaches_on_reload() {
    let Some(context) = context() else { return };
    let mut backend = WgpuBackend::new(context, ColorFormat::Rgba8Unorm).unwrap();
    let mut pipeline = BloomPipeline::default();
    pipeline.on_attached(&mut backend).unwrap();

    backend.register_program(BLUR_PROGRAM, "this is not wgsl");
    assert!(pipeline.on_programs_reloaded(&mut backend).is_err());
    assert!(!pipeline.is_attached());
}

#[test]
fn upload_and_read_back_preserve_pixels() {
    // 70 * 4 bytes is not a multiple of the row alignment, so readback
    // has to strip padding.
    let image = gradient(70, 3);

    for format in [ColorFormat::Rgba8Unorm, ColorFormat::Bgra8Unorm] {
        let Some(context) = context() else { return };
        let mut backend = WgpuBackend::new(context, format).unwrap();
        let surface = backend.upload_image(&image).unwrap();
        assert_eq!(surface.format(), format);
        assert_eq!(backend.read_surface(&surface).unwrap(), image, "{format}");
    }
}

#[test]
fn upload_rejects_mismatched_image_size() {
    let Some(context) = context() else { return };
    let mut backend = WgpuBackend::new(context, ColorFormat::Rgba8Unorm).unwrap();
    let surface = backend
        .create_surface(8, 8, ColorFormat::Rgba8Unorm)
        .unwrap();

    let err = surface
        .upload(&backend.context().queue, &gradient(4, 4))
        .unwrap_err();
    assert!(matches!(err, BloomError::InvalidResolution { width: 4, height: 4 }));
}

#[test]
fn draw_checks_input_count() {
    let Some(context) = context() else { return };
    let mut backend = WgpuBackend::new(context, ColorFormat::Rgba8Unorm).unwrap();
    let blur = backend.load_program(BLUR_PROGRAM).unwrap();
    let mut output = backend
        .create_surface(4, 4, ColorFormat::Rgba8Unorm)
        .unwrap();

    let err = backend
        .draw_fullscreen_quad(&[], &mut output, &blur, &ProgramParameters::new())
        .unwrap_err();
    assert!(matches!(
        err,
        BloomError::InputCount {
            expected: 1,
            actual: 0,
            ..
        }
    ));
}
