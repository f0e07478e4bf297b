//! The ordered list of sections a report will contain.

use cloudscope_model::ExportStats;

/// A report section. The plan is fixed before any drawing starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Cover,
    Summary,
    /// Embedded dependency graph snapshot.
    Diagram,
    /// One row per dependency record, continued across pages.
    DetailTable,
    /// Remediation guidance, present only when cycles were detected.
    CircularDependencies { count: u32 },
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Cover => "Cover",
            Self::Summary => "Executive Summary",
            Self::Diagram => "Dependency Graph",
            Self::DetailTable => "Dependency Details",
            Self::CircularDependencies { .. } => "Circular Dependencies",
        }
    }
}

/// Build the section plan.
///
/// Cover and summary are always present. The diagram needs a surface, the
/// detail table needs at least one record, and the circular dependency page
/// needs a non-zero cycle count.
pub fn plan_sections(stats: &ExportStats, record_count: usize, has_surface: bool) -> Vec<Section> {
    let mut plan = vec![Section::Cover, Section::Summary];
    if has_surface {
        plan.push(Section::Diagram);
    }
    if record_count > 0 {
        plan.push(Section::DetailTable);
    }
    if stats.cycle_count > 0 {
        plan.push(Section::CircularDependencies {
            count: stats.cycle_count,
        });
    }
    plan
}
