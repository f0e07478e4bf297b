//! Drawing onto one page in PDF user space (points, origin bottom-left).

use printpdf::path::PaintMode;
use printpdf::{ImageTransform, Line, Mm, PdfLayerReference, Point, Pt, Rect, Rgb};

use super::document::{FontSet, JpegImage};
use super::font::Font;

/// RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    fn to_pdf(self) -> printpdf::Color {
        printpdf::Color::Rgb(Rgb::new(self.r, self.g, self.b, None))
    }
}

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

fn point(x: f32, y: f32) -> Point {
    Point::new(mm(x), mm(y))
}

/// Draws onto one page layer.
pub struct PageWriter<'a> {
    layer: PdfLayerReference,
    fonts: &'a FontSet,
}

impl<'a> PageWriter<'a> {
    pub(crate) fn new(layer: PdfLayerReference, fonts: &'a FontSet) -> Self {
        Self { layer, fonts }
    }

    /// Rectangle with its lower-left corner at `(x, y)`. Nothing is drawn
    /// without a fill or a stroke.
    pub fn rect(
        &self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Color>,
        stroke: Option<(Color, f32)>,
    ) {
        let mode = match (fill, stroke) {
            (Some(_), Some(_)) => PaintMode::FillStroke,
            (Some(_), None) => PaintMode::Fill,
            (None, Some(_)) => PaintMode::Stroke,
            (None, None) => return,
        };
        self.layer.save_graphics_state();
        if let Some(color) = fill {
            self.layer.set_fill_color(color.to_pdf());
        }
        if let Some((color, line_width)) = stroke {
            self.layer.set_outline_color(color.to_pdf());
            self.layer.set_outline_thickness(line_width);
        }
        self.layer.add_rect(
            Rect::new(mm(x), mm(y), mm(x + width), mm(y + height)).with_mode(mode),
        );
        self.layer.restore_graphics_state();
    }

    pub fn line(&self, from: (f32, f32), to: (f32, f32), color: Color, line_width: f32) {
        self.layer.save_graphics_state();
        self.layer.set_outline_color(color.to_pdf());
        self.layer.set_outline_thickness(line_width);
        self.layer.add_line(Line {
            points: vec![(point(from.0, from.1), false), (point(to.0, to.1), false)],
            is_closed: false,
        });
        self.layer.restore_graphics_state();
    }

    /// Show a single line of text with its baseline at `(x, y)`.
    pub fn text(&self, font: Font, size: f32, color: Color, x: f32, y: f32, text: &str) {
        self.layer.save_graphics_state();
        self.layer.set_fill_color(color.to_pdf());
        self.layer
            .use_text(text, size, mm(x), mm(y), self.fonts.get(font));
        self.layer.restore_graphics_state();
    }

    /// Paint an image into the rectangle with its lower-left corner at
    /// `(x, y)`, stretching it to fill.
    pub fn image(&self, image: JpegImage, x: f32, y: f32, width: f32, height: f32) {
        // printpdf sizes images by resolution: pick the dpi that makes the
        // pixel width come out at `width` points, then scale vertically.
        let dpi = image.width as f32 * 72.0 / width;
        let natural_height = image.height as f32 * 72.0 / dpi;
        image.image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(mm(x)),
                translate_y: Some(mm(y)),
                scale_x: Some(1.0),
                scale_y: Some(height / natural_height),
                dpi: Some(dpi),
                ..ImageTransform::default()
            },
        );
    }
}
