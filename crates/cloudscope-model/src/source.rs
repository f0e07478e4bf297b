//! Dashboard-side relationship objects and the export model built from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{ExportRecord, RelationKind, RelationState};
use crate::stats::ExportStats;

/// Display name used when neither a name nor an identifier is available.
pub const UNKNOWN_ENTITY: &str = "unknown";

/// Reference to a service as returned by the dependency API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl EntityRef {
    pub fn new(id: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.map(str::to_string),
        }
    }

    /// Human readable name, falling back to the identifier, then to
    /// [`UNKNOWN_ENTITY`].
    pub fn display_name(&self) -> String {
        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        if !name.is_empty() {
            return name.to_string();
        }
        let id = self.id.trim();
        if id.is_empty() {
            UNKNOWN_ENTITY.to_string()
        } else {
            id.to_string()
        }
    }
}

/// A live dependency edge as held by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub source: EntityRef,
    pub target: EntityRef,
    #[serde(default)]
    pub kind: RelationKind,
    #[serde(default)]
    pub status: RelationState,
    #[serde(default)]
    pub is_critical: bool,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Input document: the relationships on screen plus the caller's cycle count.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencySnapshot {
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub cycle_count: u32,
}

/// Records plus stats for one export invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportModel {
    pub records: Vec<ExportRecord>,
    pub stats: ExportStats,
}

impl ExportModel {
    /// Build the export model from live relationship objects.
    ///
    /// Pure: the same input always yields the same output. Missing tag lists
    /// become empty vectors and the critical flag is carried through as is.
    pub fn from_relationships(
        relationships: &[Relationship],
        cycle_count: u32,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let records: Vec<ExportRecord> = relationships
            .iter()
            .map(|rel| ExportRecord {
                subject: rel.source.display_name(),
                related_to: rel.target.display_name(),
                relation_kind: rel.kind,
                state: rel.status,
                is_critical_path: rel.is_critical,
                tags: rel.tags.clone().unwrap_or_default(),
            })
            .collect();
        let stats = ExportStats::from_records(&records, cycle_count, generated_at);
        Self { records, stats }
    }

    /// Build the export model from a snapshot document.
    pub fn from_snapshot(snapshot: &DependencySnapshot, generated_at: DateTime<Utc>) -> Self {
        Self::from_relationships(&snapshot.relationships, snapshot.cycle_count, generated_at)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap()
    }

    #[test]
    fn display_name_fallbacks() {
        assert_eq!(EntityRef::new("svc-1", Some("Billing API")).display_name(), "Billing API");
        assert_eq!(EntityRef::new("svc-1", Some("  ")).display_name(), "svc-1");
        assert_eq!(EntityRef::new("svc-1", None).display_name(), "svc-1");
        assert_eq!(EntityRef::new("", None).display_name(), UNKNOWN_ENTITY);
    }

    #[test]
    fn snapshot_deserializes_with_defaults() {
        let json = r#"{
            "relationships": [
                {"source": {"id": "a", "name": "Gateway"}, "target": {"id": "b"}, "kind": "direct", "status": "deprecated"}
            ],
            "cycleCount": 2
        }"#;
        let snapshot: DependencySnapshot = serde_json::from_str(json).unwrap();
        let model = ExportModel::from_snapshot(&snapshot, at());

        assert_eq!(model.records.len(), 1);
        let record = &model.records[0];
        assert_eq!(record.subject, "Gateway");
        assert_eq!(record.related_to, "b");
        assert_eq!(record.state, RelationState::Deprecated);
        assert!(!record.is_critical_path);
        assert!(record.tags.is_empty());
        assert_eq!(model.stats.cycle_count, 2);
    }
}
