//! Integration tests for PDF report composition.

use std::cell::Cell;
use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use image::{Rgba, RgbaImage};

use cloudscope_model::{ExportFormat, ExportRecord, ExportStats, RelationKind, RelationState};
use cloudscope_output::MemorySink;
use cloudscope_raster::{
    Background, Rasterizer, RasterizerConfig, RenderError, RenderSurface, SurfaceStyle,
};
use cloudscope_report::layout::{CONTENT_BOTTOM, CONTENT_WIDTH, MARGIN, PAGE_WIDTH};
use cloudscope_report::pdf::Font;
use cloudscope_report::{
    ComposedReport, PLACEHOLDER_TEXT, PageLayout, ReportComposer, ReportOptions, Section,
};

struct CountingSurface {
    mounted: bool,
    fail: bool,
    style: SurfaceStyle,
    renders: Cell<usize>,
}

impl CountingSurface {
    fn new() -> Self {
        let mut overlays = BTreeMap::new();
        overlays.insert("zoom-controls".to_string(), true);
        Self {
            mounted: true,
            fail: false,
            style: SurfaceStyle {
                background: Background::Transparent,
                overlays,
            },
            renders: Cell::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }
}

impl RenderSurface for CountingSurface {
    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn style(&self) -> SurfaceStyle {
        self.style.clone()
    }

    fn apply_style(&mut self, style: &SurfaceStyle) {
        self.style = style.clone();
    }

    fn render(&self, pixel_ratio: f32) -> Result<RgbaImage, RenderError> {
        self.renders.set(self.renders.get() + 1);
        if self.fail {
            return Err(RenderError::Message("canvas lost".to_string()));
        }
        let width = (400.0 * pixel_ratio) as u32;
        Ok(RgbaImage::from_pixel(width, width / 2, Rgba([30, 90, 160, 255])))
    }
}

fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap()
}

/// `count` records, every 17th critical.
fn records(count: usize) -> Vec<ExportRecord> {
    (0..count)
        .map(|i| {
            ExportRecord::new(
                format!("service-{i}"),
                format!("service-{}", i + 1),
                RelationKind::Direct,
                RelationState::Active,
                i % 17 == 0,
            )
            .with_tags(["http"])
        })
        .collect()
}

fn composer() -> ReportComposer {
    ReportComposer::new(
        ReportOptions::default(),
        Rasterizer::new(RasterizerConfig::default()),
    )
}

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle.as_bytes())
}

fn shows(page: &PageLayout, text: &str) -> bool {
    page.text_runs.iter().any(|run| run == text)
}

fn count_runs(report: &ComposedReport, text: &str) -> usize {
    report
        .pages
        .iter()
        .flat_map(|page| &page.text_runs)
        .filter(|run| *run == text)
        .count()
}

fn image_count(report: &ComposedReport) -> usize {
    report.pages.iter().map(|page| page.images).sum()
}

fn assert_footers(report: &ComposedReport) {
    let total = report.page_count();
    for (index, page) in report.pages.iter().enumerate() {
        let expected = format!("Page {} of {}", index + 1, total);
        assert_eq!(page.footer.as_deref(), Some(expected.as_str()));
        assert!(shows(page, &expected), "missing footer {expected}");
    }
}

fn assert_within_margins(report: &ComposedReport) {
    for page in &report.pages {
        assert!(
            page.content_bottom <= CONTENT_BOTTOM + 1e-4,
            "page {} overflows: {}",
            page.number,
            page.content_bottom
        );
        assert!(
            page.text_right <= PAGE_WIDTH - MARGIN + 1e-4,
            "page {} text runs past the margin: {}",
            page.number,
            page.text_right
        );
    }
}

#[tokio::test(start_paused = true)]
async fn empty_export_is_cover_and_summary() {
    let stats = ExportStats::from_records(&[], 0, generated_at());
    let report = composer().compose(&[], &stats, None).await.unwrap();

    assert_eq!(report.sections, vec![Section::Cover, Section::Summary]);
    assert_eq!(report.page_count(), 2);
    assert!(report.bytes.starts_with(b"%PDF-"));
    assert!(report.degraded.is_none());
    assert!(report.missing_glyphs.is_empty());
    assert_footers(&report);
    assert_within_margins(&report);
}

#[tokio::test(start_paused = true)]
async fn full_report_with_cycles_and_diagram() {
    let records = records(50);
    let stats = ExportStats::from_records(&records, 2, generated_at());
    assert_eq!(stats.critical_path_count, 3);
    let mut surface = CountingSurface::new();
    let before = surface.style();

    let report = composer()
        .compose(&records, &stats, Some(&mut surface))
        .await
        .unwrap();

    assert_eq!(
        report.sections,
        vec![
            Section::Cover,
            Section::Summary,
            Section::Diagram,
            Section::DetailTable,
            Section::CircularDependencies { count: 2 },
        ]
    );
    assert!(report.pages_with(Section::DetailTable).count() >= 2);
    assert_eq!(
        report.pages.last().unwrap().sections,
        vec![Section::CircularDependencies { count: 2 }]
    );
    assert!(report.degraded.is_none());
    assert_eq!(surface.renders.get(), 1);
    assert_eq!(surface.style(), before);
    let diagram = report.pages_with(Section::Diagram).next().unwrap();
    assert_eq!(diagram.images, 1);
    assert_eq!(image_count(&report), 1);
    assert!(shows(report.pages.last().unwrap(), "Recommendations"));
    assert_footers(&report);
    assert_within_margins(&report);
}

#[tokio::test(start_paused = true)]
async fn table_header_repeats_on_every_table_page() {
    let records = records(120);
    let stats = ExportStats::from_records(&records, 0, generated_at());
    let report = composer().compose(&records, &stats, None).await.unwrap();

    let table_pages = report.pages_with(Section::DetailTable).count();
    assert!(table_pages >= 3);
    assert_eq!(count_runs(&report, "Depends On"), table_pages);
    assert!(
        report
            .pages_with(Section::DetailTable)
            .all(|page| shows(page, "Depends On"))
    );
    assert_eq!(count_runs(&report, "service-119"), 1);
    assert_footers(&report);
    assert_within_margins(&report);
}

#[tokio::test(start_paused = true)]
async fn no_cycle_page_without_cycles() {
    let records = records(5);
    let stats = ExportStats::from_records(&records, 0, generated_at());
    let report = composer().compose(&records, &stats, None).await.unwrap();

    assert!(
        !report
            .sections
            .iter()
            .any(|s| matches!(s, Section::CircularDependencies { .. }))
    );
    assert_eq!(count_runs(&report, "Recommendations"), 0);
}

#[tokio::test(start_paused = true)]
async fn no_surface_means_no_diagram() {
    let records = records(5);
    let stats = ExportStats::from_records(&records, 1, generated_at());
    let report = composer().compose(&records, &stats, None).await.unwrap();

    assert!(!report.sections.contains(&Section::Diagram));
    assert_eq!(report.pages_with(Section::Diagram).count(), 0);
    assert_eq!(image_count(&report), 0);
    assert!(report.degraded.is_none());
}

#[tokio::test(start_paused = true)]
async fn failed_capture_draws_placeholder() {
    let records = records(5);
    let stats = ExportStats::from_records(&records, 0, generated_at());
    let mut surface = CountingSurface::failing();
    let before = surface.style();

    let report = composer()
        .compose(&records, &stats, Some(&mut surface))
        .await
        .unwrap();

    assert!(report.sections.contains(&Section::Diagram));
    assert!(report.degraded.as_deref().unwrap().contains("canvas lost"));
    let diagram = report.pages_with(Section::Diagram).next().unwrap();
    assert!(shows(diagram, PLACEHOLDER_TEXT));
    assert_eq!(image_count(&report), 0);
    assert_eq!(surface.renders.get(), 1);
    assert_eq!(surface.style(), before);
    assert_footers(&report);
}

#[tokio::test(start_paused = true)]
async fn unmounted_surface_draws_placeholder() {
    let stats = ExportStats::from_records(&[], 0, generated_at());
    let mut surface = CountingSurface {
        mounted: false,
        ..CountingSurface::new()
    };

    let report = composer()
        .compose(&[], &stats, Some(&mut surface))
        .await
        .unwrap();

    assert_eq!(surface.renders.get(), 0);
    assert!(report.degraded.is_some());
    assert_eq!(report.page_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn export_saves_named_pdf() {
    let records = records(3);
    let stats = ExportStats::from_records(&records, 0, generated_at());
    let mut sink = MemorySink::new();

    let exported = composer()
        .export(&records, &stats, None, &mut sink)
        .await
        .unwrap();
    let saved = exported.artifact;

    assert_eq!(exported.page_count, 3);
    assert!(exported.degraded.is_none());
    assert_eq!(saved.file_name, "cloudscope-dependency-report-20240309-1405.pdf");
    assert_eq!(saved.format, ExportFormat::Pdf);
    let artifacts = sink.artifacts();
    assert_eq!(artifacts.len(), 1);
    assert!(artifacts[0].bytes.starts_with(b"%PDF-"));
    assert!(contains(&artifacts[0].bytes, "%%EOF"));
}

#[tokio::test(start_paused = true)]
async fn non_latin_names_keep_their_characters() {
    let records = vec![
        ExportRecord::new(
            "支付服务",
            "Платёжи-db",
            RelationKind::Runtime,
            RelationState::Active,
            true,
        ),
        ExportRecord::new(
            "café-api",
            "Platèží-cache",
            RelationKind::Direct,
            RelationState::Active,
            false,
        )
        .with_tags(["équipe-paiements"]),
    ];
    let stats = ExportStats::from_records(&records, 0, generated_at());
    let report = composer().compose(&records, &stats, None).await.unwrap();

    let table = report.pages_with(Section::DetailTable).next().unwrap();
    for name in [
        "支付服务",
        "Платёжи-db",
        "café-api",
        "Platèží-cache",
        "équipe-paiements",
    ] {
        assert!(shows(table, name), "{name} was not drawn verbatim");
    }
    assert!(
        report
            .pages
            .iter()
            .flat_map(|page| &page.text_runs)
            .all(|run| !run.contains('?')),
        "a character was replaced while drawing"
    );
    // The bundled face covers Latin and Cyrillic; the CJK name is drawn
    // as-is but reported as lacking glyphs.
    assert_eq!(
        report.missing_glyphs.iter().collect::<String>(),
        "付务支服"
    );
    assert!(report.bytes.starts_with(b"%PDF-"));
    assert!(contains(&report.bytes, "FontFile2"));
    assert_within_margins(&report);
}

#[tokio::test(start_paused = true)]
async fn long_cover_text_wraps_within_margins() {
    let options = ReportOptions {
        product_name: "payments-platform-observability-and-dependency-insights-for-every-region"
            .to_string(),
        title: "Quarterly Dependency Report for the Global Payments Platform".to_string(),
        ..ReportOptions::default()
    };
    let custom = ReportComposer::new(options.clone(), Rasterizer::new(RasterizerConfig::default()));
    let stats = ExportStats::from_records(&[], 0, generated_at());
    let report = custom.compose(&[], &stats, None).await.unwrap();

    let cover = &report.pages[0];
    assert!(cover.text_right <= PAGE_WIDTH - MARGIN + 1e-4);
    let title_lines: Vec<&str> = cover
        .text_runs
        .iter()
        .map(String::as_str)
        .take_while(|run| !options.product_name.starts_with(*run))
        .collect();
    assert!(title_lines.len() > 1, "title did not wrap: {title_lines:?}");
    for line in &title_lines {
        assert!(Font::SansBold.text_width(line, 26.0) / 72.0 <= CONTENT_WIDTH + 1e-4);
    }
    assert_eq!(title_lines.join(" "), options.title);
    assert_within_margins(&report);
}
