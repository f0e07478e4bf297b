//! Scoped style override for a surface under capture.

use image::Rgba;
use tracing::debug;

use crate::surface::{RenderSurface, SurfaceStyle};

/// Holds a surface in its capture style for as long as the scope lives.
///
/// Acquiring the scope snapshots the surface style, then forces a solid
/// background and hides every overlay control. Dropping the scope puts the
/// snapshot back, whichever way the capture ended (success, error, or the
/// owning future being dropped).
pub struct CaptureScope<'a> {
    surface: &'a mut dyn RenderSurface,
    original: SurfaceStyle,
}

impl<'a> CaptureScope<'a> {
    pub fn acquire(surface: &'a mut dyn RenderSurface, background: Rgba<u8>) -> Self {
        let original = surface.style();
        surface.apply_style(&original.for_capture(background));
        debug!(overlays = original.overlays.len(), "surface prepared for capture");
        Self { surface, original }
    }

    pub fn surface(&self) -> &dyn RenderSurface {
        &*self.surface
    }
}

impl Drop for CaptureScope<'_> {
    fn drop(&mut self) {
        self.surface.apply_style(&self.original);
        debug!("surface style restored");
    }
}
