//! Title page.

use cloudscope_model::ExportStats;

use crate::builder::ReportBuilder;
use crate::layout::{Align, CONTENT_WIDTH, MARGIN, PAGE_WIDTH};
use crate::sections::Section;
use crate::style;

/// Minimum height of the colored title band.
const BAND_HEIGHT: f32 = 3.2;
const MAX_TITLE_LINES: usize = 3;
const MAX_PRODUCT_LINES: usize = 2;

pub(crate) fn draw_cover(
    builder: &mut ReportBuilder,
    title: &str,
    product_name: &str,
    stats: &ExportStats,
    plan: &[Section],
) {
    builder.start_page(Section::Cover);
    let generated = stats.generated_at.format("%Y-%m-%d %H:%M UTC").to_string();
    let title_lines = style::TITLE.wrap_capped(title, CONTENT_WIDTH, MAX_TITLE_LINES);
    let product_lines = style::SUBTITLE.wrap_capped(product_name, CONTENT_WIDTH, MAX_PRODUCT_LINES);

    // Baselines inside the band; the band grows when the title wraps.
    let title_top = 1.7;
    let product_top =
        title_top + title_lines.len().saturating_sub(1) as f32 * style::TITLE.line_height() + 0.5;
    let generated_y =
        product_top + product_lines.len().max(1) as f32 * style::SUBTITLE.line_height() + 0.115;
    let band = BAND_HEIGHT.max(generated_y + 0.65);

    let mut canvas = builder.canvas();
    canvas.rect(0.0, 0.0, PAGE_WIDTH, band, Some(style::BRAND), None);
    for (index, line) in title_lines.iter().enumerate() {
        let y = title_top + index as f32 * style::TITLE.line_height();
        canvas.text(style::TITLE, MARGIN, y, Align::Left, line);
    }
    for (index, line) in product_lines.iter().enumerate() {
        let y = product_top + index as f32 * style::SUBTITLE.line_height();
        canvas.text(style::SUBTITLE, MARGIN, y, Align::Left, line);
    }
    canvas.text(
        style::SUBTITLE,
        MARGIN,
        generated_y,
        Align::Left,
        &format!("Generated {generated}"),
    );

    let mut y = band + 0.8;
    canvas.text(style::SUBHEADING, MARGIN, y, Align::Left, "At a glance");
    y += 0.35;
    let facts = [
        ("Services", stats.total_entities),
        ("Relationships", stats.total_relations),
        ("Critical path dependencies", stats.critical_path_count),
        ("Circular dependencies", stats.cycle_count as usize),
    ];
    for (label, value) in facts {
        canvas.text(style::BODY, MARGIN, y, Align::Left, label);
        canvas.text(style::BODY, MARGIN + 3.0, y, Align::Left, &value.to_string());
        y += style::BODY.line_height() + 0.06;
    }

    y += 0.45;
    canvas.text(style::SUBHEADING, MARGIN, y, Align::Left, "Contents");
    y += 0.35;
    for section in plan.iter().filter(|s| **s != Section::Cover) {
        canvas.text(style::BODY, MARGIN, y, Align::Left, section.title());
        y += style::BODY.line_height() + 0.06;
    }

    builder.cursor_mut().y = y;
}
