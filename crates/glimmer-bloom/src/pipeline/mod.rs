//! Four-pass bloom: extract -> horizontal blur -> vertical blur -> combine.
//!
//! Pass 1: extract (source -> A)
//! Pass 2: horizontal blur (A -> B)
//! Pass 3: vertical blur (B -> A)
//! Pass 4: combine (A + source -> destination)
//!
//! The host drives the pipeline through the lifecycle callbacks in
//! `lifecycle.rs` and calls [`BloomPipeline::process`] once per frame.

mod lifecycle;
mod passes;
mod surfaces;


pub use surfaces::SurfacePair;

use glimmer_common::PhysicalSize;
use glimmer_config::BloomConfig;

use crate::backend::RenderBackend;
use crate::error::BloomError;
use crate::settings::BloomSettings;

/// Handles to the three programs, resolved at attach time.
pub(crate) struct BloomPrograms<P> {
    pub(crate) extract: P,
    pub(crate) blur: P,
    pub(crate) combine: P,
    /// Declared tap capacity of the blur program.
    pub(crate) blur_samples: usize,
}

/// Bloom post-process over a [`RenderBackend`].
///
/// Owns its intermediate surfaces exclusively. Programs belong to the
/// backend; the pipeline only keeps handles to them.
pub struct BloomPipeline<B: RenderBackend> {
    settings: BloomSettings,
    scale_factor: u32,
    programs: Option<BloomPrograms<B::Program>>,
    surfaces: Option<SurfacePair<B::Surface>>,
    /// Last output resolution reported by the host.
    resolution: Option<PhysicalSize>,
}

impl<B: RenderBackend> BloomPipeline<B> {
    /// Detached pipeline with scale factor 1.
    pub fn new(settings: BloomSettings) -> Self {
        Self {
            settings,
            scale_factor: 1,
            programs: None,
            surfaces: None,
            resolution: None,
        }
    }

    /// Pipeline configured from the `[bloom]` config section.
    pub fn from_config(config: &BloomConfig) -> Result<Self, BloomError> {
        let mut pipeline = Self::new(BloomSettings::from_config(config)?);
        pipeline.set_scale_factor(config.scale_factor)?;
        Ok(pipeline)
    }

    pub fn settings(&self) -> &BloomSettings {
        &self.settings
    }

    /// Replace the settings wholesale. Takes effect at the next `process`.
    pub fn set_settings(&mut self, settings: BloomSettings) {
        self.settings = settings;
    }

    pub fn scale_factor(&self) -> u32 {
        self.scale_factor
    }

    /// Change the surface scale factor. Surfaces are reallocated at the
    /// next `process`.
    pub fn set_scale_factor(&mut self, scale_factor: u32) -> Result<(), BloomError> {
        if scale_factor == 0 {
            return Err(BloomError::InvalidScaleFactor(scale_factor));
        }
        self.scale_factor = scale_factor;
        Ok(())
    }

    /// Whether all three programs are resolved.
    pub fn is_attached(&self) -> bool {
        self.programs.is_some()
    }

    /// Tap count used by both blur passes, once attached.
    pub fn blur_sample_count(&self) -> Option<usize> {
        self.programs.as_ref().map(|p| p.blur_samples)
    }

    pub fn resolution(&self) -> Option<PhysicalSize> {
        self.resolution
    }

    pub fn surfaces(&self) -> Option<&SurfacePair<B::Surface>> {
        self.surfaces.as_ref()
    }

    /// Intermediate surface size for an output of `size`.
    fn scaled_size(&self, size: PhysicalSize) -> Result<PhysicalSize, BloomError> {
        let invalid = || BloomError::InvalidResolution {
            width: size.width,
            height: size.height,
        };
        if size.width == 0 || size.height == 0 {
            return Err(invalid());
        }
        let width = size.width.checked_mul(self.scale_factor).ok_or_else(invalid)?;
        let height = size.height.checked_mul(self.scale_factor).ok_or_else(invalid)?;
        Ok(PhysicalSize::new(width, height))
    }
}

impl<B: RenderBackend> Default for BloomPipeline<B> {
    fn default() -> Self {
        Self::new(BloomSettings::default())
    }
}
