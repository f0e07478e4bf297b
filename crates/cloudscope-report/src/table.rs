//! Paginated dependency detail table.

use cloudscope_model::ExportRecord;
use cloudscope_output::TAG_SEPARATOR;

use crate::builder::ReportBuilder;
use crate::layout::{Align, CONTENT_WIDTH, MARGIN, POINTS_PER_INCH, TextStyle, wrap_text_capped};
use crate::pdf::{Color, Font};
use crate::sections::Section;
use crate::style;

/// A fixed-width table column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub title: &'static str,
    /// Width in inches.
    pub width: f32,
}

pub const DETAIL_COLUMNS: [Column; 6] = [
    Column { title: "Service", width: 1.45 },
    Column { title: "Depends On", width: 1.45 },
    Column { title: "Type", width: 0.85 },
    Column { title: "Status", width: 0.9 },
    Column { title: "Critical", width: 0.7 },
    Column { title: "Tags", width: 1.65 },
];

pub const CELL_PADDING: f32 = 0.06;
/// Cells wrap to at most this many lines.
pub const MAX_CELL_LINES: usize = 4;

const HEADER_FILL: Color = style::BRAND;
const HEADER_TEXT: TextStyle = TextStyle::new(Font::SansBold, 9.0, Color::WHITE);
const CELL_TEXT: TextStyle = TextStyle::new(Font::Sans, 8.0, style::INK);
const CRITICAL_TEXT: TextStyle = TextStyle::new(Font::SansBold, 8.0, style::CONCERNING);

/// One table cell before wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub style: TextStyle,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: CELL_TEXT,
        }
    }
}

/// Table rows for the detail section, one per record.
pub fn detail_rows(records: &[ExportRecord]) -> Vec<[Cell; 6]> {
    records
        .iter()
        .map(|record| {
            let critical = if record.is_critical_path {
                Cell {
                    text: "Yes".into(),
                    style: CRITICAL_TEXT,
                }
            } else {
                Cell::plain("No")
            };
            [
                Cell::plain(record.subject.clone()),
                Cell::plain(record.related_to.clone()),
                Cell::plain(record.relation_kind.label()),
                Cell::plain(record.state.label()),
                critical,
                Cell::plain(record.tags.join(TAG_SEPARATOR)),
            ]
        })
        .collect()
}

fn header_height() -> f32 {
    HEADER_TEXT.line_height() + 2.0 * CELL_PADDING
}

/// Wrap every cell of a row to its column width.
fn wrap_row(row: &[Cell; 6]) -> Vec<Vec<String>> {
    row.iter()
        .zip(DETAIL_COLUMNS.iter())
        .map(|(cell, column)| {
            wrap_text_capped(
                &cell.text,
                cell.style.font,
                cell.style.size,
                column.width - 2.0 * CELL_PADDING,
                MAX_CELL_LINES,
            )
        })
        .collect()
}

fn row_height(wrapped: &[Vec<String>]) -> f32 {
    let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
    lines as f32 * CELL_TEXT.line_height() + 2.0 * CELL_PADDING
}

fn draw_header(builder: &mut ReportBuilder) {
    let y = builder.cursor().y;
    let height = header_height();
    let mut canvas = builder.canvas();
    canvas.rect(MARGIN, y, CONTENT_WIDTH, height, Some(HEADER_FILL), None);
    let baseline = y + CELL_PADDING + HEADER_TEXT.size / POINTS_PER_INCH;
    let mut x = MARGIN;
    for column in &DETAIL_COLUMNS {
        canvas.text(HEADER_TEXT, x + CELL_PADDING, baseline, Align::Left, column.title);
        x += column.width;
    }
    builder.cursor_mut().advance(height);
}

/// Draw the detail table, breaking onto new pages as rows run out of room.
/// The header row is repeated at the top of every continuation page.
pub(crate) fn draw_detail_table(builder: &mut ReportBuilder, records: &[ExportRecord]) {
    builder.start_page(Section::DetailTable);
    let top = builder.cursor().y;
    {
        let mut canvas = builder.canvas();
        canvas.text(style::HEADING, MARGIN, top + 0.25, Align::Left, "Dependency Details");
        canvas.text(
            style::CAPTION,
            MARGIN,
            top + 0.5,
            Align::Left,
            &format!("{} relationships", records.len()),
        );
    }
    builder.cursor_mut().advance(0.7);
    draw_header(builder);

    for (index, row) in detail_rows(records).iter().enumerate() {
        let wrapped = wrap_row(row);
        let height = row_height(&wrapped);
        if !builder.cursor().fits(height) {
            builder.start_page(Section::DetailTable);
            draw_header(builder);
        }

        let y = builder.cursor().y;
        let mut canvas = builder.canvas();
        if index % 2 == 1 {
            canvas.rect(MARGIN, y, CONTENT_WIDTH, height, Some(style::ROW_SHADE), None);
        }
        let mut x = MARGIN;
        for ((cell, lines), column) in row.iter().zip(&wrapped).zip(DETAIL_COLUMNS.iter()) {
            let mut baseline = y + CELL_PADDING + cell.style.size / POINTS_PER_INCH;
            for line in lines {
                canvas.text(cell.style, x + CELL_PADDING, baseline, Align::Left, line);
                baseline += cell.style.line_height();
            }
            x += column.width;
        }
        canvas.hline(MARGIN, y + height, CONTENT_WIDTH, style::RULE, 0.5);
        builder.cursor_mut().advance(height);
    }
}
