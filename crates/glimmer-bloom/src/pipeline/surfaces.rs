use glimmer_common::{ColorFormat, PhysicalSize};

use crate::backend::{RenderBackend, SurfaceHandle};
use crate::error::BloomError;

/// The two ping-pong surfaces. Both always share size and format.
pub struct SurfacePair<S> {
    pub(crate) a: S,
    pub(crate) b: S,
}

impl<S: SurfaceHandle> SurfacePair<S> {
    /// Allocate both surfaces. Nothing is leaked if the second allocation fails.
    pub(crate) fn allocate<B>(
        backend: &mut B,
        size: PhysicalSize,
        format: ColorFormat,
    ) -> Result<Self, BloomError>
    where
        B: RenderBackend<Surface = S>,
    {
        let a = backend.create_surface(size.width, size.height, format)?;
        let b = match backend.create_surface(size.width, size.height, format) {
            Ok(b) => b,
            Err(e) => {
                backend.release_surface(a);
                return Err(e);
            }
        };
        tracing::debug!("allocated bloom surfaces {size} ({format})");
        Ok(Self { a, b })
    }

    pub(crate) fn release<B>(self, backend: &mut B)
    where
        B: RenderBackend<Surface = S>,
    {
        backend.release_surface(self.a);
        backend.release_surface(self.b);
    }

    pub fn size(&self) -> PhysicalSize {
        self.a.size()
    }

    pub fn format(&self) -> ColorFormat {
        self.a.format()
    }

    /// Surface holding the extracted, and after the vertical pass the
    /// fully blurred, bloom.
    pub fn primary(&self) -> &S {
        &self.a
    }

    /// Surface holding the horizontally blurred bloom.
    pub fn secondary(&self) -> &S {
        &self.b
    }
}
