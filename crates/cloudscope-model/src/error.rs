//! Unified error types for the export pipeline.
//!
//! Every public export entry point (CSV, PNG, PDF) returns [`ExportError`].
//! Diagram embedding failures inside an otherwise successful PDF are not
//! errors; the composer degrades to a placeholder instead.

use thiserror::Error;

/// Unified error type for all export operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExportError {
    /// Rasterization requested against a missing or unmounted surface.
    #[error("Diagram surface is not ready for capture")]
    SurfaceNotReady,

    /// The underlying rasterizer failed.
    #[error("Failed to capture dependency graph: {message}")]
    CaptureFailure {
        /// Description of the capture failure.
        message: String,
    },

    /// Tabular or document encoding failed.
    #[error("Failed to generate {format} export: {message}")]
    SerializationFailure {
        /// Export format being generated (CSV, PDF, PNG).
        format: String,
        /// Detailed error message.
        message: String,
    },

    /// The download sink could not persist a finished artifact.
    #[error("Failed to save '{path}': {message}")]
    SaveFailure {
        /// Destination that failed to write.
        path: String,
        /// Detailed error message.
        message: String,
    },
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

impl ExportError {
    /// Create a capture failure from any displayable source.
    pub fn capture(source: impl std::fmt::Display) -> Self {
        Self::CaptureFailure {
            message: source.to_string(),
        }
    }

    /// Create a serialization failure with format context.
    pub fn serialization(format: impl Into<String>, source: impl std::fmt::Display) -> Self {
        Self::SerializationFailure {
            format: format.into(),
            message: source.to_string(),
        }
    }

    /// Create a save failure with path context.
    pub fn save(path: impl Into<String>, source: impl std::fmt::Display) -> Self {
        Self::SaveFailure {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Check if this error is recoverable (user can wait and retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::SurfaceNotReady | Self::CaptureFailure { .. } | Self::SaveFailure { .. }
        )
    }

    /// Get a user-friendly suggestion for fixing this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::SurfaceNotReady => {
                Some("Wait for the dependency graph to finish rendering, then retry.")
            }
            Self::CaptureFailure { .. } => {
                Some("Retry the export; if it keeps failing, export the CSV instead.")
            }
            Self::SaveFailure { .. } => Some("Check file permissions and available disk space."),
            _ => None,
        }
    }
}
