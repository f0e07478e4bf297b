//! PDF dependency reports.
//!
//! - **PDF** (`pdf`): printpdf documents with embedded DejaVu Sans and JPEG images
//! - **Layout** (`layout`): inch-based page geometry, cursor and canvas
//! - **Sections** (`sections`): the section plan
//! - **Composer** (`composer`): draws the plan into a paginated document
//!
//! Section writers live in `cover`, `summary`, `diagram`, `table` and
//! `cycles`.

mod builder;
pub mod composer;
mod cover;
mod cycles;
mod diagram;
pub mod layout;
pub mod pdf;
pub mod sections;
mod style;
pub mod summary;
pub mod table;

pub use builder::PageLayout;
pub use composer::{ComposedReport, ExportedReport, ReportComposer, ReportOptions};
pub use cycles::RECOMMENDATIONS;
pub use diagram::{DIAGRAM_HEIGHT, PLACEHOLDER_TEXT};
pub use sections::{Section, plan_sections};
pub use summary::{Accent, StatCard, key_insights, stat_cards};
