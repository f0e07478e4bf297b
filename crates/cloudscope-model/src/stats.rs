//! Aggregate statistics for a single export.

use std::collections::BTreeSet;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::record::ExportRecord;

/// Aggregate counts, computed once per export invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportStats {
    /// Distinct services appearing as subject or target.
    pub total_entities: usize,
    /// Number of export records.
    pub total_relations: usize,
    pub critical_path_count: usize,
    /// Circular dependency chains, as detected by the caller.
    pub cycle_count: u32,
    /// Captured when the export started.
    pub generated_at: DateTime<Utc>,
}

impl ExportStats {
    /// Compute stats from records. `cycle_count` is taken as given.
    pub fn from_records(
        records: &[ExportRecord],
        cycle_count: u32,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let entities: BTreeSet<&str> = records
            .iter()
            .flat_map(|r| [r.subject.as_str(), r.related_to.as_str()])
            .collect();
        Self {
            total_entities: entities.len(),
            total_relations: records.len(),
            critical_path_count: records.iter().filter(|r| r.is_critical_path).count(),
            cycle_count,
            generated_at,
        }
    }

    /// Generation time as an ISO 8601 string (second precision, `Z` suffix).
    pub fn generated_at_iso(&self) -> String {
        self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Average number of relations per entity, if there are any entities.
    pub fn relations_per_entity(&self) -> Option<f64> {
        if self.total_entities == 0 {
            None
        } else {
            Some(self.total_relations as f64 / self.total_entities as f64)
        }
    }

    pub fn has_cycles(&self) -> bool {
        self.cycle_count > 0
    }

    pub fn has_critical_paths(&self) -> bool {
        self.critical_path_count > 0
    }
}
