//! Tests for the software backend.

use super::*;
use crate::backend::{
    AddressMode, FilterMode, BLUR_PROGRAM, COMBINE_PROGRAM, EXTRACT_PROGRAM, PARAM_THRESHOLD,
};

fn grey(width: u32, height: u32, level: f32) -> CpuSurface {
    CpuSurface::solid(width, height, ColorFormat::Rgba32Float, [level, level, level, 1.0])
}

#[test]
fn builtin_programs_load() {
    let mut backend = CpuBackend::new();
    for name in [EXTRACT_PROGRAM, BLUR_PROGRAM, COMBINE_PROGRAM] {
        let program = backend.load_program(name).unwrap();
        assert_eq!(program.info().name, name);
    }
}

#[test]
fn blur_declares_default_capacity() {
    let mut backend = CpuBackend::new();
    let blur = backend.load_program(BLUR_PROGRAM).unwrap();
    assert_eq!(
        blur.info().array_len("sample_weights"),
        Some(DEFAULT_SAMPLE_COUNT)
    );
}

#[test]
fn removed_program_fails_to_load() {
    let mut backend = CpuBackend::new().without_program(COMBINE_PROGRAM);
    let err = backend.load_program(COMBINE_PROGRAM).unwrap_err();
    assert!(matches!(err, BloomError::ProgramLoad { .. }));
}

#[test]
fn zero_sized_surface_is_rejected() {
    let mut backend = CpuBackend::new();
    assert!(backend
        .create_surface(0, 10, ColorFormat::Rgba8Unorm)
        .is_err());
    assert_eq!(backend.surfaces_created(), 0);
}

#[test]
fn surface_counters_track_release() {
    let mut backend = CpuBackend::new();
    let a = backend.create_surface(4, 4, ColorFormat::Rgba8Unorm).unwrap();
    let _b = backend.create_surface(4, 4, ColorFormat::Rgba8Unorm).unwrap();
    backend.release_surface(a);
    assert_eq!(backend.surfaces_created(), 2);
    assert_eq!(backend.surfaces_released(), 1);
    assert_eq!(backend.live_surfaces(), 1);
}

#[test]
fn extract_applies_threshold() {
    let mut backend = CpuBackend::new();
    let program = backend.load_program(EXTRACT_PROGRAM).unwrap();
    let source = grey(2, 2, 0.75);
    let mut out = CpuSurface::new(2, 2, ColorFormat::Rgba32Float);

    let mut params = ProgramParameters::new();
    params.set_float(PARAM_THRESHOLD, 0.5);
    backend
        .draw_fullscreen_quad(&[&source], &mut out, &program, &params)
        .unwrap();

    // (0.75 - 0.5) / (1 - 0.5) = 0.5
    for p in out.pixels() {
        assert!((p[0] - 0.5).abs() < 1e-6);
    }
    assert_eq!(backend.pass_log().len(), 1);
    assert_eq!(backend.pass_log()[0].program, EXTRACT_PROGRAM);
}

#[test]
fn wrong_input_count_is_rejected() {
    let mut backend = CpuBackend::new();
    let program = backend.load_program(COMBINE_PROGRAM).unwrap();
    let source = grey(2, 2, 1.0);
    let mut out = CpuSurface::new(2, 2, ColorFormat::Rgba32Float);
    let err = backend
        .draw_fullscreen_quad(&[&source], &mut out, &program, &ProgramParameters::new())
        .unwrap_err();
    assert!(matches!(
        err,
        BloomError::InputCount {
            expected: 2,
            actual: 1,
            ..
        }
    ));
    assert!(backend.pass_log().is_empty());
}

#[test]
fn sampler_state_override_is_kept_per_unit() {
    let mut backend = CpuBackend::new();
    let point_wrap = SamplerState {
        filter: FilterMode::Point,
        address: AddressMode::Wrap,
    };
    backend.set_sampler_state(1, point_wrap);
    assert_eq!(backend.sampler_state(0), Some(SamplerState::LINEAR_CLAMP));
    assert_eq!(backend.sampler_state(1), Some(point_wrap));

    // Out-of-range units are ignored.
    backend.set_sampler_state(7, SamplerState::POINT_CLAMP);
    assert_eq!(backend.sampler_state(7), None);
}
