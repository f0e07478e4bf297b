//! Export orchestration: busy guarding, model construction and outcomes.
//!
//! The orchestrator is the thin caller around the producers. It builds a
//! fresh [`ExportModel`] per export, hands the producer a fresh surface when
//! one is needed, and turns each `Result` into an [`ExportOutcome`] for the
//! summary table.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};

use cloudscope_model::{DependencySnapshot, ExportError, ExportFormat, ExportModel};
use cloudscope_output::{CsvOptions, DownloadSink, SavedArtifact, export_csv};
use cloudscope_raster::{PngOptions, Rasterizer, RenderError, RenderSurface, export_png};
use cloudscope_report::{ReportComposer, ReportOptions};

use crate::input::DiagramSource;

/// Errors surfaced to the user for a single export.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Another export is still running.
    #[error("An export is already in progress")]
    Busy,

    #[error("Failed to load diagram: {0}")]
    Diagram(#[from] RenderError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl OrchestratorError {
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Busy => Some("Wait for the current export to finish."),
            Self::Diagram(_) => Some("Check that the diagram and overlay files are valid SVG."),
            Self::Export(error) => error.suggestion(),
        }
    }
}

/// Which export to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Csv,
    Png,
    Pdf,
}

impl ExportKind {
    pub fn format(&self) -> ExportFormat {
        match self {
            Self::Csv => ExportFormat::Csv,
            Self::Png => ExportFormat::Png,
            Self::Pdf => ExportFormat::Pdf,
        }
    }
}

/// Result of one export, ready for display.
#[derive(Debug)]
pub struct ExportOutcome {
    pub format: ExportFormat,
    pub result: Result<SavedArtifact, OrchestratorError>,
    /// Non-fatal remark, such as a diagram replaced by a placeholder.
    pub note: Option<String>,
}

impl ExportOutcome {
    fn new(format: ExportFormat, result: Result<SavedArtifact, OrchestratorError>) -> Self {
        Self {
            format,
            result,
            note: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Clears the busy flag on drop.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Product-level export settings the orchestrator passes to every producer.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub product_name: String,
    pub rasterizer: Rasterizer,
}

/// Runs exports one at a time.
#[derive(Debug)]
pub struct ExportOrchestrator {
    config: OrchestratorConfig,
    busy: AtomicBool,
}

impl ExportOrchestrator {
    pub fn new(config: OrchestratorConfig) -> Self {
        Self {
            config,
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Run one export. A second call while one is in flight fails with
    /// [`OrchestratorError::Busy`] without touching the sink.
    pub async fn run(
        &self,
        kind: ExportKind,
        snapshot: &DependencySnapshot,
        diagram: Option<&DiagramSource>,
        sink: &mut dyn DownloadSink,
    ) -> ExportOutcome {
        let format = kind.format();
        let Some(_guard) = BusyGuard::try_acquire(&self.busy) else {
            warn!(format = format.label(), "export rejected, another export is running");
            return ExportOutcome::new(format, Err(OrchestratorError::Busy));
        };

        let model = ExportModel::from_snapshot(snapshot, Utc::now());
        let outcome = match kind {
            ExportKind::Csv => ExportOutcome::new(format, self.csv(&model, sink)),
            ExportKind::Png => ExportOutcome::new(format, self.png(&model, diagram, sink).await),
            ExportKind::Pdf => self.pdf(&model, diagram, sink).await,
        };

        match &outcome.result {
            Ok(saved) => info!(
                format = format.label(),
                file = %saved.file_name,
                size = saved.size,
                "export finished"
            ),
            Err(err) => error!(format = format.label(), error = %err, "export failed"),
        }
        outcome
    }

    /// Run several exports in sequence, each with its own model.
    pub async fn run_all(
        &self,
        kinds: &[ExportKind],
        snapshot: &DependencySnapshot,
        diagram: Option<&DiagramSource>,
        sink: &mut dyn DownloadSink,
    ) -> Vec<ExportOutcome> {
        let mut outcomes = Vec::with_capacity(kinds.len());
        for kind in kinds {
            outcomes.push(self.run(*kind, snapshot, diagram, sink).await);
        }
        outcomes
    }

    fn csv(
        &self,
        model: &ExportModel,
        sink: &mut dyn DownloadSink,
    ) -> Result<SavedArtifact, OrchestratorError> {
        let options = CsvOptions {
            product_name: self.config.product_name.clone(),
            ..CsvOptions::default()
        };
        Ok(export_csv(&model.records, &model.stats, &options, sink)?)
    }

    async fn png(
        &self,
        model: &ExportModel,
        diagram: Option<&DiagramSource>,
        sink: &mut dyn DownloadSink,
    ) -> Result<SavedArtifact, OrchestratorError> {
        let mut surface = diagram.map(DiagramSource::surface).transpose()?;
        let options = PngOptions {
            product_name: self.config.product_name.clone(),
        };
        Ok(export_png(
            &self.config.rasterizer,
            surface.as_mut().map(|s| s as &mut dyn RenderSurface),
            model.stats.generated_at,
            &options,
            sink,
        )
        .await?)
    }

    async fn pdf(
        &self,
        model: &ExportModel,
        diagram: Option<&DiagramSource>,
        sink: &mut dyn DownloadSink,
    ) -> ExportOutcome {
        let format = ExportFormat::Pdf;
        let mut surface = match diagram.map(DiagramSource::surface).transpose() {
            Ok(surface) => surface,
            Err(err) => return ExportOutcome::new(format, Err(err.into())),
        };
        let composer = ReportComposer::new(
            ReportOptions {
                product_name: self.config.product_name.clone(),
                ..ReportOptions::default()
            },
            self.config.rasterizer.clone(),
        );
        let exported = composer
            .export(
                &model.records,
                &model.stats,
                surface.as_mut().map(|s| s as &mut dyn RenderSurface),
                sink,
            )
            .await;
        match exported {
            Ok(report) => ExportOutcome {
                format,
                note: report
                    .degraded
                    .map(|reason| format!("diagram not embedded: {reason}")),
                result: Ok(report.artifact),
            },
            Err(err) => ExportOutcome::new(format, Err(err.into())),
        }
    }
}
