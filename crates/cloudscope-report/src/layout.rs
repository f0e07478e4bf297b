//! Page geometry in inches and the sequential layout cursor.
//!
//! Section writers work in inches with the origin at the top-left corner of
//! the page and `y` growing downwards. [`Canvas`] converts to PDF user space
//! (points, origin bottom-left) when drawing.

use crate::builder::PageLayout;
use crate::pdf::{Color, Font, JpegImage, PageWriter};

pub const POINTS_PER_INCH: f32 = 72.0;

/// US Letter.
pub const PAGE_WIDTH: f32 = 8.5;
pub const PAGE_HEIGHT: f32 = 11.0;
pub const MARGIN: f32 = 0.75;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
/// Lowest y any section content may reach.
pub const CONTENT_BOTTOM: f32 = PAGE_HEIGHT - MARGIN;
/// Baseline of the running footer, inside the bottom margin.
pub const FOOTER_BASELINE: f32 = PAGE_HEIGHT - 0.4;

/// Line height as a multiple of font size.
pub const LINE_SPACING: f32 = 1.3;

/// Height of one text line in inches.
pub fn line_height(size: f32) -> f32 {
    size * LINE_SPACING / POINTS_PER_INCH
}

/// Width of `text` in inches.
pub fn text_width(font: Font, size: f32, text: &str) -> f32 {
    font.text_width(text, size) / POINTS_PER_INCH
}

/// Greedy word wrap to `max_width` inches. Words wider than a line are split.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(font, size, &candidate) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if text_width(font, size, word) <= max_width {
            current = word.to_string();
        } else {
            for ch in word.chars() {
                current.push(ch);
                if text_width(font, size, &current) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(ch);
                }
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap and cap at `max_lines`, marking truncation with an ellipsis.
pub fn wrap_text_capped(
    text: &str,
    font: Font,
    size: f32,
    max_width: f32,
    max_lines: usize,
) -> Vec<String> {
    let mut lines = wrap_text(text, font, size, max_width);
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            while !last.is_empty() && text_width(font, size, &format!("{last}...")) > max_width {
                last.pop();
            }
            last.push_str("...");
        }
    }
    lines
}

/// Current drawing position: page index plus x/y in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub page: usize,
    pub x: f32,
    pub y: f32,
}

impl LayoutCursor {
    /// Cursor at the top-left content corner of `page`.
    pub fn top_of(page: usize) -> Self {
        Self {
            page,
            x: MARGIN,
            y: MARGIN,
        }
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    pub fn fits(&self, height: f32) -> bool {
        self.y + height <= CONTENT_BOTTOM + f32::EPSILON
    }
}

/// Font, size (points) and color of a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub color: Color,
}

impl TextStyle {
    pub const fn new(font: Font, size: f32, color: Color) -> Self {
        Self { font, size, color }
    }

    pub fn line_height(&self) -> f32 {
        line_height(self.size)
    }

    pub fn width(&self, text: &str) -> f32 {
        text_width(self.font, self.size, text)
    }

    pub fn wrap(&self, text: &str, max_width: f32) -> Vec<String> {
        wrap_text(text, self.font, self.size, max_width)
    }

    pub fn wrap_capped(&self, text: &str, max_width: f32, max_lines: usize) -> Vec<String> {
        wrap_text_capped(text, self.font, self.size, max_width, max_lines)
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Draws onto one page in inch coordinates and records on the page's
/// [`PageLayout`] what was drawn and how far content reaches.
pub struct Canvas<'a> {
    page: PageWriter<'a>,
    layout: &'a mut PageLayout,
}

impl<'a> Canvas<'a> {
    pub fn new(page: PageWriter<'a>, layout: &'a mut PageLayout) -> Self {
        Self { page, layout }
    }

    fn reach(&mut self, y: f32) {
        if y > self.layout.content_bottom {
            self.layout.content_bottom = y;
        }
    }

    fn pt_x(x: f32) -> f32 {
        x * POINTS_PER_INCH
    }

    fn pt_y(y: f32) -> f32 {
        (PAGE_HEIGHT - y) * POINTS_PER_INCH
    }

    /// Rectangle with its top-left corner at `(x, y)`.
    pub fn rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Color>,
        stroke: Option<(Color, f32)>,
    ) {
        if fill.is_none() && stroke.is_none() {
            return;
        }
        self.page.rect(
            Self::pt_x(x),
            Self::pt_y(y + height),
            width * POINTS_PER_INCH,
            height * POINTS_PER_INCH,
            fill,
            stroke,
        );
        self.reach(y + height);
    }

    /// Horizontal rule at `y`.
    pub fn hline(&mut self, x: f32, y: f32, width: f32, color: Color, width_pt: f32) {
        self.page.line(
            (Self::pt_x(x), Self::pt_y(y)),
            (Self::pt_x(x + width), Self::pt_y(y)),
            color,
            width_pt,
        );
        self.reach(y);
    }

    /// One line of text with its baseline at `y`. With [`Align::Center`], `x`
    /// is the center of the line.
    pub fn text(&mut self, style: TextStyle, x: f32, y: f32, align: Align, text: &str) {
        let width = style.width(text);
        let left = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
        };
        self.page.text(
            style.font,
            style.size,
            style.color,
            Self::pt_x(left),
            Self::pt_y(y),
            text,
        );

        self.layout
            .missing_glyphs
            .extend(style.font.missing_glyphs(text));
        self.layout.text_runs.push(text.to_string());
        self.layout.text_right = self.layout.text_right.max(left + width);
        // descenders sit about a fifth of the size below the baseline
        self.reach(y + style.size * 0.2 / POINTS_PER_INCH);
    }

    /// Image with its top-left corner at `(x, y)`, stretched to the box.
    pub fn image(&mut self, image: JpegImage, x: f32, y: f32, width: f32, height: f32) {
        self.page.image(
            image,
            Self::pt_x(x),
            Self::pt_y(y + height),
            width * POINTS_PER_INCH,
            height * POINTS_PER_INCH,
        );
        self.layout.images += 1;
        self.reach(y + height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::PdfDocument;

    const BODY: TextStyle = TextStyle::new(Font::Sans, 10.0, Color::BLACK);

    #[test]
    fn content_width_subtracts_margins() {
        assert!((CONTENT_WIDTH - 7.0).abs() < f32::EPSILON);
        assert!(FOOTER_BASELINE > CONTENT_BOTTOM);
    }

    #[test]
    fn wraps_on_words_and_splits_long_words() {
        let lines = wrap_text("alpha beta gamma delta", Font::Sans, 10.0, 0.8);
        assert!(lines.len() > 1);
        assert!(lines
            .iter()
            .all(|l| text_width(Font::Sans, 10.0, l) <= 0.8));
        assert_eq!(lines.join(" "), "alpha beta gamma delta");

        let long = "x".repeat(80);
        let lines = wrap_text(&long, Font::Sans, 10.0, 1.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), long);
    }

    #[test]
    fn capped_wrap_marks_truncation() {
        let text = "word ".repeat(200);
        let lines = wrap_text_capped(&text, Font::Sans, 8.0, 1.0, 3);
        assert_eq!(lines.len(), 3);
        assert!(lines[2].ends_with("..."));
    }

    #[test]
    fn canvas_records_extent_and_text() {
        let mut doc = PdfDocument::new("Test", 612.0, 792.0).unwrap();
        let index = doc.add_page();
        let mut layout = PageLayout::new(index + 1);
        let mut canvas = Canvas::new(doc.page(index), &mut layout);
        canvas.rect(1.0, 2.0, 1.0, 0.5, Some(Color::BLACK), None);
        canvas.rect(1.0, 1.0, 1.0, 5.0, None, None);
        canvas.text(BODY, 1.0, 1.5, Align::Left, "Платёжи");
        canvas.text(BODY, 4.0, 1.8, Align::Center, "支付");

        assert!((layout.content_bottom - 2.5).abs() < f32::EPSILON);
        assert_eq!(layout.text_runs, vec!["Платёжи", "支付"]);
        assert_eq!(layout.missing_glyphs.iter().collect::<String>(), "付支");
        let half = BODY.width("支付") / 2.0;
        assert!((layout.text_right - (4.0 + half)).abs() < 1e-4);
    }

    #[test]
    fn cursor_fits_until_bottom() {
        let mut cursor = LayoutCursor::top_of(0);
        assert!(cursor.fits(CONTENT_BOTTOM - MARGIN));
        cursor.advance(9.0);
        assert!(!cursor.fits(1.0));
    }
}
