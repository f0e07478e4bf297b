//! The rendered-surface seam.
//!
//! A surface is whatever the diagram component draws into. The rasterizer
//! only needs to read and write its style (background and overlay control
//! visibility) and ask it to render itself into a bitmap.

use std::collections::BTreeMap;

use image::{Rgba, RgbaImage};
use thiserror::Error;

/// Background fill of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Transparent,
    Solid(Rgba<u8>),
}

/// Style attributes the rasterizer may temporarily override.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurfaceStyle {
    pub background: Background,
    /// Overlay control elements (zoom controls, toolbars) by id, with their
    /// visibility.
    pub overlays: BTreeMap<String, bool>,
}

impl SurfaceStyle {
    /// The style used while capturing: solid background, every overlay hidden.
    pub fn for_capture(&self, background: Rgba<u8>) -> Self {
        Self {
            background: Background::Solid(background),
            overlays: self.overlays.keys().map(|id| (id.clone(), false)).collect(),
        }
    }
}

/// Errors raised while a surface renders itself.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid SVG: {0}")]
    Svg(#[from] resvg::usvg::Error),

    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    #[error("invalid pixel ratio {0}")]
    PixelRatio(f32),

    #[error("{0}")]
    Message(String),
}

/// A mounted visual surface that can be rasterized.
pub trait RenderSurface {
    /// Whether the surface is currently mounted and visible.
    fn is_mounted(&self) -> bool;

    /// Snapshot of the current style.
    fn style(&self) -> SurfaceStyle;

    /// Replace the current style.
    fn apply_style(&mut self, style: &SurfaceStyle);

    /// Render the surface as it currently looks.
    fn render(&self, pixel_ratio: f32) -> Result<RgbaImage, RenderError>;
}
