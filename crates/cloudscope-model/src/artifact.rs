//! Artifact naming and the in-memory artifact handed to download sinks.

use chrono::{DateTime, Utc};

/// Export file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Png,
    Pdf,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Png => "png",
            Self::Pdf => "pdf",
        }
    }

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Png => "PNG",
            Self::Pdf => "PDF",
        }
    }
}

/// What an artifact contains; decides the file name stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Tabular dependency listing.
    DependencyTable,
    /// Snapshot of the dependency graph.
    DependencyGraph,
    /// Paginated dependency report.
    DependencyReport,
}

impl ArtifactKind {
    fn stem(&self) -> &'static str {
        match self {
            Self::DependencyTable => "dependencies",
            Self::DependencyGraph => "dependency-graph",
            Self::DependencyReport => "dependency-report",
        }
    }

    pub fn format(&self) -> ExportFormat {
        match self {
            Self::DependencyTable => ExportFormat::Csv,
            Self::DependencyGraph => ExportFormat::Png,
            Self::DependencyReport => ExportFormat::Pdf,
        }
    }
}

/// Minute-precision timestamp used in file names (`YYYYMMDD-HHMM`).
pub fn file_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d-%H%M").to_string()
}

/// Build `<product>-<stem>-<YYYYMMDD-HHMM>.<ext>`.
pub fn artifact_file_name(product: &str, kind: ArtifactKind, at: DateTime<Utc>) -> String {
    format!(
        "{}-{}-{}.{}",
        product,
        kind.stem(),
        file_timestamp(at),
        kind.format().extension()
    )
}

/// A fully built export, ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(file_name: impl Into<String>, format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            format,
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
