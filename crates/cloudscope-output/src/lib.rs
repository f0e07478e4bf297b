//! Dependency export outputs.
//!
//! - **Tabular** (`tabular`): CSV document with a metadata preamble
//! - **Sinks** (`sink`): where finished artifacts are "downloaded" to

pub mod sink;
pub mod tabular;

pub use sink::{DirectorySink, DownloadSink, MemorySink, SavedArtifact};
pub use tabular::{
    CsvOptions, HEADER, PREAMBLE_KEYS, TAG_SEPARATOR, export_csv, render_csv,
};
