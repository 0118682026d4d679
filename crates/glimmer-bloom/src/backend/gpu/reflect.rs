//! Pull program metadata out of WGSL source.
//!
//! Programs declare their parameters as a `struct Params { ... }` bound at
//! `@binding(0)`, one field per line, and their inputs as `texture_2d<f32>`
//! globals. Only `f32` scalars and `array<vec4<f32>, N>` fields are
//! supported; that is enough for every bloom program and keeps the uniform
//! layout trivial to pack.

use std::sync::LazyLock;

use regex::Regex;

use crate::backend::{ParameterDecl, ProgramInfo};
use crate::error::BloomError;

static PARAMS_STRUCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)struct\s+Params\s*\{(?P<body>.*?)\}").unwrap());

static ARRAY_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>\w+)\s*:\s*array<\s*vec4<f32>\s*,\s*(?P<len>\d+)u?\s*>\s*,?$").unwrap()
});

static SCALAR_FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<name>\w+)\s*:\s*f32\s*,?$").unwrap());

static TEXTURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"var\s+\w+\s*:\s*texture_2d<f32>").unwrap());

/// Build the [`ProgramInfo`] for the program `name` from its WGSL source.
pub fn reflect_program(name: &str, source: &str) -> Result<ProgramInfo, BloomError> {
    let fail = |reason: String| BloomError::ProgramLoad {
        name: name.to_owned(),
        reason,
    };

    let mut parameters = Vec::new();
    if let Some(caps) = PARAMS_STRUCT_RE.captures(source) {
        for raw in caps["body"].lines() {
            let line = raw.split("//").next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if let Some(field) = ARRAY_FIELD_RE.captures(line) {
                let len = field["len"]
                    .parse::<usize>()
                    .map_err(|e| fail(format!("bad array length in '{line}': {e}")))?;
                parameters.push(ParameterDecl::array(&field["name"], len));
            } else if let Some(field) = SCALAR_FIELD_RE.captures(line) {
                parameters.push(ParameterDecl::scalar(&field["name"]));
            } else {
                return Err(fail(format!("unsupported parameter declaration '{line}'")));
            }
        }
    }

    let texture_inputs = TEXTURE_RE.find_iter(source).count();
    if texture_inputs == 0 {
        return Err(fail("program samples no textures".into()));
    }

    Ok(ProgramInfo {
        name: name.to_owned(),
        parameters,
        texture_inputs,
    })
}
