//! Circular dependency guidance.

use crate::builder::ReportBuilder;
use crate::layout::{Align, CONTENT_WIDTH, MARGIN};
use crate::sections::Section;
use crate::style;

pub const RECOMMENDATIONS: [&str; 5] = [
    "Map each cycle and identify the relationship that is least essential to break it.",
    "Introduce an interface or shared contract so services depend on abstractions rather than each other.",
    "Replace synchronous calls inside a cycle with events or message queues where latency allows.",
    "Extract shared functionality into a separate service that the cycle members can depend on.",
    "Add dependency checks to the deployment pipeline so new cycles are caught before release.",
];

pub(crate) fn draw_cycles(builder: &mut ReportBuilder, count: u32) {
    builder.start_page(Section::CircularDependencies { count });
    let top = builder.cursor().y;
    let mut canvas = builder.canvas();
    canvas.text(style::HEADING, MARGIN, top + 0.25, Align::Left, "Circular Dependencies");
    canvas.hline(MARGIN, top + 0.45, CONTENT_WIDTH, style::RULE, 1.0);

    let mut y = top + 0.85;
    let noun = if count == 1 { "chain was" } else { "chains were" };
    let intro = format!(
        "{count} circular dependency {noun} detected. Cycles make services harder to deploy \
         independently and can turn a single failure into a cascade."
    );
    for line in style::BODY.wrap(&intro, CONTENT_WIDTH) {
        canvas.text(style::BODY, MARGIN, y, Align::Left, &line);
        y += style::BODY.line_height();
    }

    y += 0.3;
    canvas.text(style::SUBHEADING, MARGIN, y, Align::Left, "Recommendations");
    y += 0.35;
    let indent = 0.3;
    for (index, recommendation) in RECOMMENDATIONS.iter().enumerate() {
        canvas.text(style::BODY, MARGIN, y, Align::Left, &format!("{}.", index + 1));
        for line in style::BODY.wrap(recommendation, CONTENT_WIDTH - indent) {
            canvas.text(style::BODY, MARGIN + indent, y, Align::Left, &line);
            y += style::BODY.line_height();
        }
        y += 0.1;
    }
    builder.cursor_mut().y = y;
}
