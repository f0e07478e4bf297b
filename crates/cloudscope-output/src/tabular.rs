//! CSV export of dependency records.
//!
//! Document layout:
//!
//! ```text
//! "exportSource","Cloudscope Dependency Map"
//! "exportedAt","2024-03-09T14:05:30Z"
//! "totalEntities","4"
//! "totalRelations","3"
//! "criticalPaths","1"
//! "circularDependencies","0"
//!
//! "Service","Depends On","Dependency Type","Status","Critical Path","Tags"
//! "api","db","direct","active","Yes","prod; eu"
//! ```
//!
//! Every field is quoted and lines end in CRLF.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::{debug, info_span};

use cloudscope_model::{
    Artifact, ArtifactKind, ExportError, ExportFormat, ExportRecord, ExportStats, Result,
    artifact_file_name,
};

use crate::sink::{DownloadSink, SavedArtifact};

/// Joins tags inside a single column.
pub const TAG_SEPARATOR: &str = "; ";

/// Preamble keys, in output order.
pub const PREAMBLE_KEYS: [&str; 6] = [
    "exportSource",
    "exportedAt",
    "totalEntities",
    "totalRelations",
    "criticalPaths",
    "circularDependencies",
];

/// Column header row.
pub const HEADER: [&str; 6] = [
    "Service",
    "Depends On",
    "Dependency Type",
    "Status",
    "Critical Path",
    "Tags",
];

const FORMAT: &str = "CSV";

/// Options for CSV generation.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Product name used in the file name.
    pub product_name: String,
    /// Value of the `exportSource` preamble entry.
    pub export_source: String,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            product_name: "cloudscope".to_string(),
            export_source: "Cloudscope Dependency Map".to_string(),
        }
    }
}

impl CsvOptions {
    pub fn new(product_name: impl Into<String>, export_source: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            export_source: export_source.into(),
        }
    }
}

/// Render the full CSV document in memory.
pub fn render_csv(
    records: &[ExportRecord],
    stats: &ExportStats,
    options: &CsvOptions,
) -> Result<String> {
    let mut preamble = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    let values = [
        options.export_source.clone(),
        stats.generated_at_iso(),
        stats.total_entities.to_string(),
        stats.total_relations.to_string(),
        stats.critical_path_count.to_string(),
        stats.cycle_count.to_string(),
    ];
    for (key, value) in PREAMBLE_KEYS.iter().zip(values.iter()) {
        preamble
            .write_record([*key, value.as_str()])
            .map_err(|e| ExportError::serialization(FORMAT, e))?;
    }
    let mut buffer = preamble
        .into_inner()
        .map_err(|e| ExportError::serialization(FORMAT, e))?;
    buffer.extend_from_slice(b"\r\n");

    let mut body = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(buffer);
    body.write_record(HEADER)
        .map_err(|e| ExportError::serialization(FORMAT, e))?;
    for record in records {
        let tags = record.tags.join(TAG_SEPARATOR);
        body.write_record([
            record.subject.as_str(),
            record.related_to.as_str(),
            record.relation_kind.as_str(),
            record.state.as_str(),
            if record.is_critical_path { "Yes" } else { "No" },
            tags.as_str(),
        ])
        .map_err(|e| ExportError::serialization(FORMAT, e))?;
    }
    let bytes = body
        .into_inner()
        .map_err(|e| ExportError::serialization(FORMAT, e))?;
    String::from_utf8(bytes).map_err(|e| ExportError::serialization(FORMAT, e))
}

/// Render the CSV document and hand it to the sink.
///
/// The document is fully built before the sink sees it; on error nothing is
/// saved.
pub fn export_csv(
    records: &[ExportRecord],
    stats: &ExportStats,
    options: &CsvOptions,
    sink: &mut dyn DownloadSink,
) -> Result<SavedArtifact> {
    let span = info_span!("csv_export", records = records.len());
    let _guard = span.enter();

    let text = render_csv(records, stats, options)?;
    let file_name = artifact_file_name(
        &options.product_name,
        ArtifactKind::DependencyTable,
        stats.generated_at,
    );
    debug!(file = %file_name, bytes = text.len(), "csv rendered");
    sink.save(Artifact::new(file_name, ExportFormat::Csv, text.into_bytes()))
}
