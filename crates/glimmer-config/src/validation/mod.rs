//! Full configuration validation.
//!
//! Validates all numeric ranges and enumerated strings. Each domain has its
//! own submodule; this orchestrator calls them all and collects errors into
//! a single `ConfigError`.

mod bloom;
mod helpers;
mod logging;
mod render;

#[cfg(test)]
mod tests;

use crate::schema::GlimmerConfig;
use glimmer_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &GlimmerConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    bloom::validate_bloom(&mut errors, config);
    render::validate_render(&mut errors, config);
    logging::validate_logging(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
