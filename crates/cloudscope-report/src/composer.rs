//! Report composition: plan the sections, draw them in order, paginate.

use std::collections::BTreeSet;

use tracing::{debug, info, instrument, warn};

use cloudscope_model::{
    Artifact, ArtifactKind, ExportError, ExportFormat, ExportRecord, ExportStats, Result,
    artifact_file_name,
};
use cloudscope_output::{DownloadSink, SavedArtifact};
use cloudscope_raster::{Rasterizer, RenderSurface};

use crate::builder::{PageLayout, ReportBuilder};
use crate::cover::draw_cover;
use crate::cycles::draw_cycles;
use crate::diagram::draw_diagram;
use crate::pdf::PdfError;
use crate::sections::{Section, plan_sections};
use crate::summary::draw_summary;
use crate::table::draw_detail_table;

/// Options for PDF report generation.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub product_name: String,
    pub title: String,
    /// JPEG quality for the embedded diagram (1-100).
    pub jpeg_quality: u8,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            product_name: "cloudscope".to_string(),
            title: "Service Dependency Report".to_string(),
            jpeg_quality: 85,
        }
    }
}

/// A finished report and a description of what went where.
#[derive(Debug, Clone)]
pub struct ComposedReport {
    pub bytes: Vec<u8>,
    pub sections: Vec<Section>,
    pub pages: Vec<PageLayout>,
    /// Set when the diagram was replaced by a placeholder.
    pub degraded: Option<String>,
    /// Characters the report font could not draw, across all pages.
    pub missing_glyphs: BTreeSet<char>,
}

impl ComposedReport {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages carrying `section`, in order.
    pub fn pages_with(&self, section: Section) -> impl Iterator<Item = &PageLayout> {
        self.pages
            .iter()
            .filter(move |page| page.sections.contains(&section))
    }
}

/// A saved report.
#[derive(Debug, Clone)]
pub struct ExportedReport {
    pub artifact: SavedArtifact,
    pub page_count: usize,
    /// Why the diagram was replaced by a placeholder, if it was.
    pub degraded: Option<String>,
}

fn pdf_error(error: PdfError) -> ExportError {
    ExportError::serialization(ExportFormat::Pdf.label(), error)
}

/// Builds multi-section PDF reports.
#[derive(Debug)]
pub struct ReportComposer {
    options: ReportOptions,
    rasterizer: Rasterizer,
}

impl ReportComposer {
    pub fn new(options: ReportOptions, rasterizer: Rasterizer) -> Self {
        Self {
            options,
            rasterizer,
        }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Compose the report in memory.
    ///
    /// Without a surface the diagram section is skipped and nothing is
    /// rasterized. A failing capture degrades to a placeholder; only PDF
    /// serialization errors fail the export.
    pub async fn compose(
        &self,
        records: &[ExportRecord],
        stats: &ExportStats,
        surface: Option<&mut dyn RenderSurface>,
    ) -> Result<ComposedReport> {
        let plan = plan_sections(stats, records.len(), surface.is_some());
        debug!(?plan, "report sections planned");

        let mut builder = ReportBuilder::new(&self.options.title).map_err(pdf_error)?;
        let mut surface = surface;
        let mut degraded = None;

        for section in &plan {
            match *section {
                Section::Cover => draw_cover(
                    &mut builder,
                    &self.options.title,
                    &self.options.product_name,
                    stats,
                    &plan,
                ),
                Section::Summary => draw_summary(&mut builder, stats),
                Section::Diagram => {
                    if let Some(surface) = surface.take() {
                        degraded = draw_diagram(
                            &mut builder,
                            &self.rasterizer,
                            surface,
                            self.options.jpeg_quality,
                        )
                        .await;
                    }
                }
                Section::DetailTable => draw_detail_table(&mut builder, records),
                Section::CircularDependencies { count } => draw_cycles(&mut builder, count),
            }
        }

        builder.paginate();
        let (bytes, pages) = builder.finish().map_err(pdf_error)?;
        let missing_glyphs: BTreeSet<char> = pages
            .iter()
            .flat_map(|page| page.missing_glyphs.iter().copied())
            .collect();
        if !missing_glyphs.is_empty() {
            warn!(
                characters = %missing_glyphs.iter().collect::<String>(),
                "report font has no glyph for some characters; they render as boxes"
            );
        }
        Ok(ComposedReport {
            bytes,
            sections: plan,
            pages,
            degraded,
            missing_glyphs,
        })
    }

    /// Compose the report and hand it to `sink`. A degraded diagram is
    /// reported on the result, not as an error.
    #[instrument(name = "pdf_export", skip_all, fields(records = records.len()))]
    pub async fn export(
        &self,
        records: &[ExportRecord],
        stats: &ExportStats,
        surface: Option<&mut dyn RenderSurface>,
        sink: &mut dyn DownloadSink,
    ) -> Result<ExportedReport> {
        let report = self.compose(records, stats, surface).await?;
        info!(
            pages = report.page_count(),
            bytes = report.bytes.len(),
            degraded = report.degraded.is_some(),
            "report composed"
        );
        let file_name = artifact_file_name(
            &self.options.product_name,
            ArtifactKind::DependencyReport,
            stats.generated_at,
        );
        let page_count = report.page_count();
        let artifact = sink.save(Artifact::new(file_name, ExportFormat::Pdf, report.bytes))?;
        Ok(ExportedReport {
            artifact,
            page_count,
            degraded: report.degraded,
        })
    }
}
