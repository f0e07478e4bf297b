//! Flattened dependency rows.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a service relates to the service it depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    #[default]
    Direct,
    Indirect,
    Optional,
    Runtime,
}

impl RelationKind {
    /// Wire value (e.g. "direct").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Indirect => "indirect",
            Self::Optional => "optional",
            Self::Runtime => "runtime",
        }
    }

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Direct => "Direct",
            Self::Indirect => "Indirect",
            Self::Optional => "Optional",
            Self::Runtime => "Runtime",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a dependency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationState {
    #[default]
    Active,
    Inactive,
    Deprecated,
}

impl RelationState {
    /// Wire value (e.g. "active").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Deprecated => "deprecated",
        }
    }

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Deprecated => "Deprecated",
        }
    }
}

impl fmt::Display for RelationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of dependency data, ready for export.
///
/// `subject` and `related_to` are always non-empty display strings; see
/// [`crate::ExportModel::from_relationships`] for the fallback rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    /// The owning service.
    pub subject: String,
    /// The service it depends on.
    pub related_to: String,
    pub relation_kind: RelationKind,
    pub state: RelationState,
    pub is_critical_path: bool,
    /// Ordered tags, possibly empty.
    pub tags: Vec<String>,
}

impl ExportRecord {
    /// Create a record with no tags.
    pub fn new(
        subject: impl Into<String>,
        related_to: impl Into<String>,
        relation_kind: RelationKind,
        state: RelationState,
        is_critical_path: bool,
    ) -> Self {
        Self {
            subject: subject.into(),
            related_to: related_to.into(),
            relation_kind,
            state,
            is_critical_path,
            tags: Vec::new(),
        }
    }

    /// Attach tags, preserving their order.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_use_lowercase_wire_values() {
        let json = serde_json::to_string(&RelationState::Deprecated).unwrap();
        assert_eq!(json, "\"deprecated\"");
        let kind: RelationKind = serde_json::from_str("\"runtime\"").unwrap();
        assert_eq!(kind, RelationKind::Runtime);
        assert_eq!(kind.to_string(), "runtime");
    }

    #[test]
    fn with_tags_keeps_order() {
        let record = ExportRecord::new(
            "api",
            "db",
            RelationKind::Direct,
            RelationState::Active,
            false,
        )
        .with_tags(["prod", "eu-west-1", "prod"]);
        assert_eq!(record.tags, vec!["prod", "eu-west-1", "prod"]);
    }
}
