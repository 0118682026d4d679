//! Program metadata and sampler state shared by all backends.

/// Registered name of the bright-pass program.
pub const EXTRACT_PROGRAM: &str = "bloom_extract";
/// Registered name of the separable gaussian program.
pub const BLUR_PROGRAM: &str = "gaussian_blur";
/// Registered name of the combine program.
pub const COMBINE_PROGRAM: &str = "bloom_combine";

pub const PARAM_THRESHOLD: &str = "bloom_threshold";
pub const PARAM_SAMPLE_WEIGHTS: &str = "sample_weights";
pub const PARAM_SAMPLE_OFFSETS: &str = "sample_offsets";
pub const PARAM_BLOOM_INTENSITY: &str = "bloom_intensity";
pub const PARAM_BASE_INTENSITY: &str = "base_intensity";
pub const PARAM_BLOOM_SATURATION: &str = "bloom_saturation";
pub const PARAM_BASE_SATURATION: &str = "base_saturation";

/// Shape of one declared program parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Scalar,
    /// Fixed-length array; `len` is the declared capacity.
    Array { len: usize },
}

/// One declared program parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDecl {
    pub name: String,
    pub kind: ParameterKind,
}

impl ParameterDecl {
    pub fn scalar(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            kind: ParameterKind::Scalar,
        }
    }

    pub fn array(name: &str, len: usize) -> Self {
        Self {
            name: name.to_owned(),
            kind: ParameterKind::Array { len },
        }
    }
}

/// Metadata a program declares about its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub name: String,
    /// Parameters in declaration order.
    pub parameters: Vec<ParameterDecl>,
    /// Number of texture units sampled.
    pub texture_inputs: usize,
}

impl ProgramInfo {
    pub fn parameter(&self, name: &str) -> Option<&ParameterDecl> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Declared length of an array parameter.
    pub fn array_len(&self, name: &str) -> Option<usize> {
        match self.parameter(name)?.kind {
            ParameterKind::Array { len } => Some(len),
            ParameterKind::Scalar => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Linear,
    Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressMode {
    #[default]
    Clamp,
    Wrap,
}

/// Filtering and addressing applied when a texture unit is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SamplerState {
    pub filter: FilterMode,
    pub address: AddressMode,
}

impl SamplerState {
    pub const LINEAR_CLAMP: Self = Self {
        filter: FilterMode::Linear,
        address: AddressMode::Clamp,
    };
    pub const POINT_CLAMP: Self = Self {
        filter: FilterMode::Point,
        address: AddressMode::Clamp,
    };
    pub const LINEAR_WRAP: Self = Self {
        filter: FilterMode::Linear,
        address: AddressMode::Wrap,
    };
}
