//! Embedded dependency graph snapshot.

use tracing::warn;

use cloudscope_raster::{CaptureTarget, Rasterizer, RenderSurface};

use crate::builder::ReportBuilder;
use crate::layout::{Align, CONTENT_WIDTH, MARGIN, PAGE_WIDTH, TextStyle};
use crate::pdf::{Color, Font, JpegImage};
use crate::sections::Section;
use crate::style;

/// Height reserved for the diagram. The image is stretched to fill
/// `CONTENT_WIDTH` by this height.
pub const DIAGRAM_HEIGHT: f32 = 5.0;

pub const PLACEHOLDER_TEXT: &str = "Dependency graph could not be embedded";

const PLACEHOLDER: TextStyle = TextStyle::new(Font::SansBold, 12.0, style::MUTED);
const PLACEHOLDER_FILL: Color = Color::rgb(245, 245, 245);

/// Draw the diagram page. Returns the reason when the snapshot could not be
/// embedded and a placeholder was drawn instead.
pub(crate) async fn draw_diagram(
    builder: &mut ReportBuilder,
    rasterizer: &Rasterizer,
    surface: &mut dyn RenderSurface,
    jpeg_quality: u8,
) -> Option<String> {
    builder.start_page(Section::Diagram);
    let top = builder.cursor().y;
    {
        let mut canvas = builder.canvas();
        canvas.text(style::HEADING, MARGIN, top + 0.25, Align::Left, "Dependency Graph");
        canvas.hline(MARGIN, top + 0.45, CONTENT_WIDTH, style::RULE, 1.0);
    }
    let frame_top = top + 0.75;

    let embedded = match rasterizer
        .capture(Some(surface), CaptureTarget::Document)
        .await
    {
        Ok(captured) => captured
            .to_jpeg(jpeg_quality)
            .map_err(|e| e.to_string())
            .and_then(|jpeg| {
                JpegImage::decode(&jpeg, captured.width(), captured.height())
                    .map_err(|e| e.to_string())
            }),
        Err(error) => Err(error.to_string()),
    };

    let degraded = match embedded {
        Ok(image) => {
            builder
                .canvas()
                .image(image, MARGIN, frame_top, CONTENT_WIDTH, DIAGRAM_HEIGHT);
            None
        }
        Err(reason) => {
            warn!(%reason, "diagram not embedded, drawing placeholder");
            let mut canvas = builder.canvas();
            canvas.rect(
                MARGIN,
                frame_top,
                CONTENT_WIDTH,
                DIAGRAM_HEIGHT,
                Some(PLACEHOLDER_FILL),
                Some((style::RULE, 1.0)),
            );
            canvas.text(
                PLACEHOLDER,
                PAGE_WIDTH / 2.0,
                frame_top + DIAGRAM_HEIGHT / 2.0,
                Align::Center,
                PLACEHOLDER_TEXT,
            );
            Some(reason)
        }
    };

    let caption_y = frame_top + DIAGRAM_HEIGHT + 0.3;
    builder.canvas().text(
        style::CAPTION,
        MARGIN,
        caption_y,
        Align::Left,
        "Snapshot of the dependency graph at export time.",
    );
    builder.cursor_mut().y = caption_y;
    degraded
}
