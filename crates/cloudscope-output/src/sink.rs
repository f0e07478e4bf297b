//! Download sinks for finished artifacts.
//!
//! Producers build the complete artifact in memory and only then hand it to a
//! sink, so a failed export never leaves a partial file behind.

use std::fs;
use std::path::PathBuf;

use cloudscope_model::{Artifact, ExportError, ExportFormat, Result};
use tracing::info;

/// Where a saved artifact ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifact {
    pub file_name: String,
    pub format: ExportFormat,
    /// Size in bytes.
    pub size: usize,
    /// Location on disk, if the sink writes files.
    pub path: Option<PathBuf>,
}

/// Receives finished artifacts (the local equivalent of a browser download).
pub trait DownloadSink {
    /// Persist or hand off the artifact.
    fn save(&mut self, artifact: Artifact) -> Result<SavedArtifact>;
}

/// Writes artifacts into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectorySink {
    fn save(&mut self, artifact: Artifact) -> Result<SavedArtifact> {
        let path = self.dir.join(&artifact.file_name);
        let shown = path.display().to_string();
        fs::create_dir_all(&self.dir)
            .map_err(|e| ExportError::save(self.dir.display().to_string(), e))?;

        // Write next to the target, then rename into place.
        let partial = self.dir.join(format!("{}.part", artifact.file_name));
        if let Err(error) = fs::write(&partial, &artifact.bytes) {
            let _ = fs::remove_file(&partial);
            return Err(ExportError::save(shown, error));
        }
        if let Err(error) = fs::rename(&partial, &path) {
            let _ = fs::remove_file(&partial);
            return Err(ExportError::save(shown, error));
        }

        info!(
            file = %artifact.file_name,
            format = artifact.format.label(),
            bytes = artifact.len(),
            path = %shown,
            "artifact saved"
        );
        Ok(SavedArtifact {
            file_name: artifact.file_name,
            format: artifact.format,
            size: artifact.bytes.len(),
            path: Some(path),
        })
    }
}

/// Keeps artifacts in memory. Used by tests and embedding callers.
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: Vec<Artifact>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }
}

impl DownloadSink for MemorySink {
    fn save(&mut self, artifact: Artifact) -> Result<SavedArtifact> {
        let saved = SavedArtifact {
            file_name: artifact.file_name.clone(),
            format: artifact.format,
            size: artifact.bytes.len(),
            path: None,
        };
        self.artifacts.push(artifact);
        Ok(saved)
    }
}
