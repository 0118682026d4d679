//! Texture sampling with the filter and address modes of a texture unit.

use super::surface::CpuSurface;
use crate::backend::{AddressMode, FilterMode, SamplerState, SurfaceHandle};

/// Sample `surface` at normalized coordinates `(u, v)`.
///
/// Texel centres sit at `(i + 0.5) / size`, matching GPU conventions.
pub(crate) fn sample(surface: &CpuSurface, state: SamplerState, u: f32, v: f32) -> [f32; 4] {
    let size = surface.size();
    let (w, h) = (size.width as i64, size.height as i64);
    if w == 0 || h == 0 {
        return [0.0; 4];
    }

    match state.filter {
        FilterMode::Point => {
            let x = address((u * w as f32).floor() as i64, w, state.address);
            let y = address((v * h as f32).floor() as i64, h, state.address);
            surface.pixel(x, y)
        }
        FilterMode::Linear => {
            let px = u * w as f32 - 0.5;
            let py = v * h as f32 - 0.5;
            let x0 = px.floor();
            let y0 = py.floor();
            let fx = px - x0;
            let fy = py - y0;
            let (x0, y0) = (x0 as i64, y0 as i64);

            let fetch = |x: i64, y: i64| {
                surface.pixel(address(x, w, state.address), address(y, h, state.address))
            };
            let top = lerp4(fetch(x0, y0), fetch(x0 + 1, y0), fx);
            let bottom = lerp4(fetch(x0, y0 + 1), fetch(x0 + 1, y0 + 1), fx);
            lerp4(top, bottom, fy)
        }
    }
}

fn address(i: i64, len: i64, mode: AddressMode) -> u32 {
    match mode {
        AddressMode::Clamp => i.clamp(0, len - 1) as u32,
        AddressMode::Wrap => i.rem_euclid(len) as u32,
    }
}

fn lerp4(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}
