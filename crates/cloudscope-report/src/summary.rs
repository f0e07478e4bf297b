//! Executive summary: statistic cards and key insights.

use cloudscope_model::ExportStats;

use crate::builder::ReportBuilder;
use crate::layout::{Align, CONTENT_WIDTH, MARGIN, TextStyle};
use crate::pdf::{Color, Font};
use crate::sections::Section;
use crate::style;

pub const CARD_COLUMNS: usize = 2;
pub const CARD_GAP: f32 = 0.3;
pub const CARD_WIDTH: f32 = (CONTENT_WIDTH - CARD_GAP) / CARD_COLUMNS as f32;
pub const CARD_HEIGHT: f32 = 1.1;

const VALUE: TextStyle = TextStyle::new(Font::SansBold, 26.0, style::INK);
const LABEL: TextStyle = TextStyle::new(Font::Sans, 10.0, style::MUTED);

/// How a card's border is colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    /// Plain totals.
    Neutral,
    Healthy,
    Concerning,
}

impl Accent {
    /// Healthy at zero, concerning otherwise.
    pub fn for_risk(count: usize) -> Self {
        if count > 0 {
            Self::Concerning
        } else {
            Self::Healthy
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Neutral => style::NEUTRAL,
            Self::Healthy => style::HEALTHY,
            Self::Concerning => style::CONCERNING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: usize,
    pub accent: Accent,
}

/// The four summary cards in grid order.
pub fn stat_cards(stats: &ExportStats) -> [StatCard; 4] {
    let cycles = stats.cycle_count as usize;
    [
        StatCard {
            label: "Total Services",
            value: stats.total_entities,
            accent: Accent::Neutral,
        },
        StatCard {
            label: "Total Relationships",
            value: stats.total_relations,
            accent: Accent::Neutral,
        },
        StatCard {
            label: "Critical Path Dependencies",
            value: stats.critical_path_count,
            accent: Accent::for_risk(stats.critical_path_count),
        },
        StatCard {
            label: "Circular Dependencies",
            value: cycles,
            accent: Accent::for_risk(cycles),
        },
    ]
}

/// Plain-language observations derived from the statistics.
pub fn key_insights(stats: &ExportStats) -> Vec<String> {
    let mut insights = Vec::new();

    match stats.relations_per_entity() {
        Some(ratio) => insights.push(format!(
            "{} services are connected by {} relationships, an average of {:.1} per service.",
            stats.total_entities, stats.total_relations, ratio
        )),
        None => insights.push("No services or relationships were captured in this export.".into()),
    }

    if stats.has_critical_paths() {
        let share = stats.critical_path_count as f64 * 100.0 / stats.total_relations.max(1) as f64;
        insights.push(format!(
            "{} relationships ({share:.0}%) lie on a critical path and deserve priority monitoring.",
            stats.critical_path_count
        ));
    } else {
        insights.push("No relationships are marked as critical path.".into());
    }

    if stats.has_cycles() {
        let count = stats.cycle_count;
        let noun = if count == 1 { "chain was" } else { "chains were" };
        insights.push(format!(
            "{count} circular dependency {noun} detected. See the remediation guidance at the end of this report."
        ));
    } else if stats.total_relations > 0 {
        insights.push("The dependency graph is free of circular dependencies.".into());
    }

    insights
}

pub(crate) fn draw_summary(builder: &mut ReportBuilder, stats: &ExportStats) {
    builder.start_page(Section::Summary);
    let top = builder.cursor().y;

    let mut canvas = builder.canvas();
    canvas.text(style::HEADING, MARGIN, top + 0.25, Align::Left, "Executive Summary");
    canvas.hline(MARGIN, top + 0.45, CONTENT_WIDTH, style::RULE, 1.0);

    let grid_top = top + 0.75;
    let cards = stat_cards(stats);
    for (index, card) in cards.iter().enumerate() {
        let column = index % CARD_COLUMNS;
        let row = index / CARD_COLUMNS;
        let x = MARGIN + column as f32 * (CARD_WIDTH + CARD_GAP);
        let y = grid_top + row as f32 * (CARD_HEIGHT + CARD_GAP);
        let accent = card.accent.color();
        canvas.rect(x, y, CARD_WIDTH, CARD_HEIGHT, Some(style::CARD_FILL), Some((accent, 1.5)));
        canvas.rect(x, y, 0.08, CARD_HEIGHT, Some(accent), None);
        canvas.text(VALUE, x + 0.3, y + 0.55, Align::Left, &card.value.to_string());
        canvas.text(LABEL, x + 0.3, y + 0.85, Align::Left, card.label);
    }
    let rows = cards.len().div_ceil(CARD_COLUMNS);
    let mut y = grid_top + rows as f32 * CARD_HEIGHT + (rows - 1) as f32 * CARD_GAP + 0.6;

    canvas.text(style::SUBHEADING, MARGIN, y, Align::Left, "Key Insights");
    y += 0.35;
    let indent = 0.2;
    for insight in key_insights(stats) {
        canvas.text(style::BODY, MARGIN, y, Align::Left, "-");
        for line in style::BODY.wrap(&insight, CONTENT_WIDTH - indent) {
            canvas.text(style::BODY, MARGIN + indent, y, Align::Left, &line);
            y += style::BODY.line_height();
        }
        y += 0.08;
    }

    builder.cursor_mut().y = y;
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use cloudscope_model::{ExportRecord, RelationKind, RelationState};

    use super::*;

    fn record(subject: &str, related: &str, critical: bool) -> ExportRecord {
        ExportRecord::new(
            subject,
            related,
            RelationKind::Direct,
            RelationState::Active,
            critical,
        )
    }

    #[test]
    fn card_width_fills_content_area() {
        assert!((CARD_WIDTH - 3.35).abs() < 1e-4);
    }

    #[test]
    fn risk_cards_turn_red_when_non_zero() {
        let records = vec![record("a", "b", true), record("b", "c", false)];
        let stats = ExportStats::from_records(&records, 1, Utc::now());
        let cards = stat_cards(&stats);
        assert_eq!(cards[0].accent, Accent::Neutral);
        assert_eq!(cards[1].accent, Accent::Neutral);
        assert_eq!(cards[2].accent, Accent::Concerning);
        assert_eq!(cards[3].accent, Accent::Concerning);

        let calm = ExportStats::from_records(&records[1..], 0, Utc::now());
        let cards = stat_cards(&calm);
        assert_eq!(cards[2].accent, Accent::Healthy);
        assert_eq!(cards[3].accent, Accent::Healthy);
    }

    #[test]
    fn insights_cover_empty_and_busy_graphs() {
        let empty = ExportStats::from_records(&[], 0, Utc::now());
        let insights = key_insights(&empty);
        assert_eq!(insights.len(), 2);
        assert!(insights[0].contains("No services"));

        let records = vec![record("a", "b", true), record("b", "c", false)];
        let busy = ExportStats::from_records(&records, 2, Utc::now());
        let insights = key_insights(&busy);
        assert_eq!(insights.len(), 3);
        assert!(insights[0].starts_with("3 services are connected by 2 relationships"));
        assert!(insights[1].contains("(50%)"));
        assert!(insights[2].starts_with("2 circular dependency chains were detected"));
    }

    #[test]
    fn single_cycle_reads_singular() {
        let records = vec![record("a", "b", false), record("b", "a", false)];
        let stats = ExportStats::from_records(&records, 1, Utc::now());
        let insights = key_insights(&stats);
        assert!(insights[2].starts_with("1 circular dependency chain was detected."));
    }
}
