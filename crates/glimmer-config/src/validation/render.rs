//! Render section validation.

use crate::schema::{BackendKind, GlimmerConfig};

/// The gpu backend uploads and reads back 8-bit surfaces only.
pub(crate) fn validate_render(errors: &mut Vec<String>, config: &GlimmerConfig) {
    let render = &config.render;
    if render.backend == BackendKind::Gpu && !render.back_buffer_format.is_unorm8() {
        errors.push(format!(
            "render.back_buffer_format = '{}' is not supported by the gpu backend \
             (expected rgba8-unorm or bgra8-unorm)",
            render.back_buffer_format
        ));
    }
}
