//! Export data model for Cloudscope dependency reports.
//!
//! Everything in this crate is a read-only snapshot built fresh for a single
//! export invocation:
//!
//! - **Records** ([`ExportRecord`]): one flattened row per dependency edge.
//! - **Stats** ([`ExportStats`]): aggregate counts computed once per export.
//! - **Source** ([`Relationship`], [`DependencySnapshot`]): the shape the
//!   dashboard hands us, before display names are resolved.
//! - **Artifacts** ([`ExportFormat`], [`artifact_file_name`]): naming shared by
//!   every producer.
//!
//! # Error Handling
//!
//! All producers report failures through the shared [`ExportError`] taxonomy.

pub mod artifact;
pub mod error;
pub mod record;
pub mod source;
pub mod stats;

pub use artifact::{Artifact, ArtifactKind, ExportFormat, artifact_file_name, file_timestamp};
pub use error::{ExportError, Result};
pub use record::{ExportRecord, RelationKind, RelationState};
pub use source::{DependencySnapshot, EntityRef, ExportModel, Relationship};
pub use stats::ExportStats;
