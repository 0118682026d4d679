//! Pack named parameters into a WGSL uniform block.
//!
//! Layout follows WGSL uniform rules for the two supported field shapes:
//! `f32` scalars are 4-byte aligned and packed tightly; `array<vec4<f32>, N>`
//! is 16-byte aligned with a 16-byte stride. Scalar values go in `.x`,
//! 2D vectors in `.xy`. Short arrays are zero-filled, which gives unused
//! blur taps zero weight.

use crate::backend::{ParamValue, ParameterKind, ProgramInfo, ProgramParameters};
use crate::error::BloomError;

const VEC4: usize = 4;

/// Serialize `params` in the declaration order of `info`.
///
/// Fields whose names start with `_` are padding and default to zero.
pub fn pack_uniforms(
    info: &ProgramInfo,
    params: &ProgramParameters,
) -> Result<Vec<u8>, BloomError> {
    params.check_declared(info)?;

    let missing = |parameter: &str| BloomError::MissingParameter {
        program: info.name.clone(),
        parameter: parameter.to_owned(),
    };
    let wrong_type = |parameter: &str| BloomError::ParameterType {
        program: info.name.clone(),
        parameter: parameter.to_owned(),
    };

    let mut words: Vec<f32> = Vec::new();
    for decl in &info.parameters {
        let name = decl.name.as_str();
        match decl.kind {
            ParameterKind::Scalar => match params.get(name) {
                Some(ParamValue::Float(v)) => words.push(*v),
                None if name.starts_with('_') => words.push(0.0),
                None => return Err(missing(name)),
                Some(_) => return Err(wrong_type(name)),
            },
            ParameterKind::Array { len } => {
                align(&mut words, VEC4);
                let elements: Vec<[f32; 4]> = match params.get(name) {
                    Some(ParamValue::Floats(v)) => v.iter().map(|&x| [x, 0.0, 0.0, 0.0]).collect(),
                    Some(ParamValue::Vec2s(v)) => {
                        v.iter().map(|&[x, y]| [x, y, 0.0, 0.0]).collect()
                    }
                    Some(ParamValue::Float(_)) => return Err(wrong_type(name)),
                    None if name.starts_with('_') => Vec::new(),
                    None => return Err(missing(name)),
                };
                if elements.len() > len {
                    return Err(BloomError::InvalidSampleCapacity(elements.len()));
                }
                words.extend(elements.iter().flatten());
                words.resize(words.len() + (len - elements.len()) * VEC4, 0.0);
            }
        }
    }

    align(&mut words, VEC4);
    if words.is_empty() {
        words.resize(VEC4, 0.0);
    }
    Ok(bytemuck::cast_slice(&words).to_vec())
}

fn align(words: &mut Vec<f32>, to: usize) {
    let rem = words.len() % to;
    if rem != 0 {
        words.resize(words.len() + to - rem, 0.0);
    }
}
