//! Standalone PNG snapshot export.

use chrono::{DateTime, Utc};
use tracing::instrument;

use cloudscope_model::{
    Artifact, ArtifactKind, ExportError, ExportFormat, Result, artifact_file_name,
};
use cloudscope_output::{DownloadSink, SavedArtifact};

use crate::capture::{CaptureTarget, Rasterizer};
use crate::surface::RenderSurface;

/// Options for PNG export.
#[derive(Debug, Clone)]
pub struct PngOptions {
    pub product_name: String,
}

impl Default for PngOptions {
    fn default() -> Self {
        Self {
            product_name: "cloudscope".to_string(),
        }
    }
}

/// Capture the surface at full resolution and save it as a PNG.
#[instrument(name = "png_export", skip_all)]
pub async fn export_png(
    rasterizer: &Rasterizer,
    surface: Option<&mut dyn RenderSurface>,
    generated_at: DateTime<Utc>,
    options: &PngOptions,
    sink: &mut dyn DownloadSink,
) -> Result<SavedArtifact> {
    let captured = rasterizer
        .capture(surface, CaptureTarget::Standalone)
        .await?;
    let bytes = captured
        .to_png()
        .map_err(|e| ExportError::serialization(ExportFormat::Png.label(), e))?;
    let file_name = artifact_file_name(
        &options.product_name,
        ArtifactKind::DependencyGraph,
        generated_at,
    );
    sink.save(Artifact::new(file_name, ExportFormat::Png, bytes))
}
