//! Tests for the full validation pipeline.

use super::*;
use crate::schema::BackendKind;
use glimmer_common::ColorFormat;

#[test]
fn default_config_validates() {
    let config = GlimmerConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_scale_factor_zero() {
    let mut config = GlimmerConfig::default();
    config.bloom.scale_factor = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("bloom.scale_factor"));
}

#[test]
fn catches_scale_factor_too_large() {
    let mut config = GlimmerConfig::default();
    config.bloom.scale_factor = 9;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("bloom.scale_factor"));
}

#[test]
fn catches_threshold_of_one() {
    let mut config = GlimmerConfig::default();
    config.bloom.threshold = Some(1.0);
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("bloom.threshold"));
}

#[test]
fn accepts_threshold_of_zero() {
    let mut config = GlimmerConfig::default();
    config.bloom.threshold = Some(0.0);
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_non_positive_blur_amount() {
    let mut config = GlimmerConfig::default();
    config.bloom.blur_amount = Some(0.0);
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("bloom.blur_amount"));

    config.bloom.blur_amount = Some(-2.0);
    assert!(validate(&config).is_err());

    config.bloom.blur_amount = Some(f32::NAN);
    assert!(validate(&config).is_err());
}

#[test]
fn catches_negative_intensity() {
    let mut config = GlimmerConfig::default();
    config.bloom.bloom_intensity = Some(-0.5);
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("bloom.bloom_intensity"));
}

#[test]
fn catches_unknown_log_level() {
    let mut config = GlimmerConfig::default();
    config.logging.level = "loud".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("logging.level"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = GlimmerConfig::default();
    config.bloom.scale_factor = 0;
    config.bloom.base_saturation = Some(50.0);
    config.logging.level = "chatty".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("bloom.scale_factor"));
    assert!(err.contains("bloom.base_saturation"));
    assert!(err.contains("logging.level"));
}

#[test]
fn gpu_backend_rejects_float_back_buffer() {
    let mut config = GlimmerConfig::default();
    config.render.backend = BackendKind::Gpu;
    config.render.back_buffer_format = ColorFormat::Rgba16Float;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("render.back_buffer_format"));
    assert!(err.contains("rgba16-float"));

    config.render.back_buffer_format = ColorFormat::Rgba32Float;
    assert!(validate(&config).is_err());

    config.render.back_buffer_format = ColorFormat::Bgra8Unorm;
    assert!(validate(&config).is_ok());
}

#[test]
fn cpu_backend_accepts_float_back_buffer() {
    let mut config = GlimmerConfig::default();
    config.render.backend = BackendKind::Cpu;
    config.render.back_buffer_format = ColorFormat::Rgba32Float;
    assert!(validate(&config).is_ok());
}
