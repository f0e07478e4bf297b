//! SVG-backed render surface.
//!
//! The diagram and each overlay control layer are separate SVG documents
//! sharing one coordinate space; overlays are drawn on top of the diagram in
//! insertion order when visible.

use image::RgbaImage;
use resvg::tiny_skia::{self, Pixmap};
use resvg::usvg::{Options, Tree};

use crate::surface::{Background, RenderError, RenderSurface, SurfaceStyle};

/// An overlay control layer (zoom controls, toolbar, minimap).
struct Overlay {
    id: String,
    tree: Tree,
    visible: bool,
}

/// A dependency diagram rendered from SVG.
pub struct SvgSurface {
    tree: Tree,
    overlays: Vec<Overlay>,
    background: Background,
    options: Options<'static>,
}

impl SvgSurface {
    /// Parse a diagram SVG. A parsed surface is always mounted and starts
    /// with a transparent background.
    pub fn from_svg(data: &[u8]) -> Result<Self, RenderError> {
        let mut options = Options::default();
        options.fontdb_mut().load_system_fonts();
        let tree = Tree::from_data(data, &options)?;
        Ok(Self {
            tree,
            overlays: Vec::new(),
            background: Background::Transparent,
            options,
        })
    }

    /// Add a visible overlay layer.
    pub fn with_overlay(mut self, id: impl Into<String>, data: &[u8]) -> Result<Self, RenderError> {
        let tree = Tree::from_data(data, &self.options)?;
        self.overlays.push(Overlay {
            id: id.into(),
            tree,
            visible: true,
        });
        Ok(self)
    }

    #[must_use]
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Diagram size in CSS pixels.
    pub fn size(&self) -> (f32, f32) {
        let size = self.tree.size();
        (size.width(), size.height())
    }
}

impl RenderSurface for SvgSurface {
    fn is_mounted(&self) -> bool {
        true
    }

    fn style(&self) -> SurfaceStyle {
        SurfaceStyle {
            background: self.background,
            overlays: self
                .overlays
                .iter()
                .map(|o| (o.id.clone(), o.visible))
                .collect(),
        }
    }

    fn apply_style(&mut self, style: &SurfaceStyle) {
        self.background = style.background;
        for overlay in &mut self.overlays {
            if let Some(visible) = style.overlays.get(&overlay.id) {
                overlay.visible = *visible;
            }
        }
    }

    fn render(&self, pixel_ratio: f32) -> Result<RgbaImage, RenderError> {
        if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
            return Err(RenderError::PixelRatio(pixel_ratio));
        }
        let (width, height) = self.size();
        let width = (width * pixel_ratio).ceil().max(1.0) as u32;
        let height = (height * pixel_ratio).ceil().max(1.0) as u32;
        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Canvas { width, height })?;

        if let Background::Solid(color) = self.background {
            pixmap.fill(tiny_skia::Color::from_rgba8(
                color[0], color[1], color[2], color[3],
            ));
        }
        let transform = tiny_skia::Transform::from_scale(pixel_ratio, pixel_ratio);
        resvg::render(&self.tree, transform, &mut pixmap.as_mut());
        for overlay in self.overlays.iter().filter(|o| o.visible) {
            resvg::render(&overlay.tree, transform, &mut pixmap.as_mut());
        }

        // tiny-skia stores premultiplied alpha
        let data: Vec<u8> = pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let c = pixel.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        RgbaImage::from_raw(width, height, data).ok_or(RenderError::Canvas { width, height })
    }
}
