use glimmer_common::ColorFormat;

/// Errors raised by the bloom pipeline and its backends.
#[derive(Debug, thiserror::Error)]
pub enum BloomError {
    #[error("failed to load program '{name}': {reason}")]
    ProgramLoad { name: String, reason: String },

    #[error("bloom pipeline is not attached: programs have not been loaded")]
    NotAttached,

    #[error("blur program declares {0} samples; expected a centre tap plus pairs (an odd count)")]
    InvalidSampleCapacity(usize),

    #[error("program '{program}' declares {weights} sample weights but only {offsets} offsets")]
    SampleLayout {
        program: String,
        weights: usize,
        offsets: usize,
    },

    #[error("invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("invalid scale factor {0}: must be at least 1")]
    InvalidScaleFactor(u32),

    #[error("invalid bloom settings: {0}")]
    InvalidSettings(String),

    #[error("program '{program}' has no parameter '{parameter}'")]
    MissingParameter { program: String, parameter: String },

    #[error("parameter '{parameter}' of program '{program}' has the wrong type")]
    ParameterType { program: String, parameter: String },

    #[error("program '{program}' samples {expected} textures, got {actual}")]
    InputCount {
        program: String,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported color format: {0}")]
    UnsupportedFormat(ColorFormat),

    #[error("no suitable GPU adapter found")]
    AdapterNotFound,

    #[error("device error: {0}")]
    Device(String),
}

impl From<wgpu::RequestDeviceError> for BloomError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        BloomError::Device(e.to_string())
    }
}

impl From<BloomError> for glimmer_common::GlimmerError {
    fn from(e: BloomError) -> Self {
        glimmer_common::GlimmerError::Bloom(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_load_display() {
        let err = BloomError::ProgramLoad {
            name: "gaussian_blur".into(),
            reason: "not registered".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load program 'gaussian_blur': not registered"
        );
    }

    #[test]
    fn invalid_resolution_display() {
        let err = BloomError::InvalidResolution {
            width: 0,
            height: 600,
        };
        assert_eq!(err.to_string(), "invalid resolution 0x600");
    }

    #[test]
    fn sample_layout_display_names_both_arrays() {
        let err = BloomError::SampleLayout {
            program: "gaussian_blur".into(),
            weights: 13,
            offsets: 9,
        };
        assert_eq!(
            err.to_string(),
            "program 'gaussian_blur' declares 13 sample weights but only 9 offsets"
        );
    }

    #[test]
    fn converts_into_glimmer_error() {
        let err: glimmer_common::GlimmerError = BloomError::NotAttached.into();
        assert!(matches!(err, glimmer_common::GlimmerError::Bloom(_)));
        assert!(err.to_string().contains("not attached"));
    }
}
