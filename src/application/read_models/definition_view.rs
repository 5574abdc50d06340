//! Definition view structs for read model
//!
//! A definition's criteria tree is flattened into its pre-order node list with
//! explicit depths, which is what every formatter renders.

use super::entity_view::ComparisonView;
use crate::oval::services::UnresolvedReference;
use serde::Serialize;

/// View representation of one vulnerability definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub title: String,
    pub description: String,
    pub references: Vec<ReferenceView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<AdvisoryView>,
    /// Criteria tree in depth-first pre-order
    pub criteria: Vec<CriteriaNodeView>,
    /// Set for `deprecated="true"` definitions, which may come without criteria
    pub deprecated: bool,
    pub status: ResolutionStatus,
    /// True when fail-fast resolution stopped before the end of the tree
    pub truncated: bool,
    /// Every broken reference of this definition, in traversal order
    pub unresolved: Vec<UnresolvedReference>,
}

impl DefinitionView {
    /// The id when present, the title otherwise
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.title)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    Resolved,
    PartiallyUnresolved,
}

impl ResolutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionStatus::Resolved => "resolved",
            ResolutionStatus::PartiallyUnresolved => "partially unresolved",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceView {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdvisoryView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rights: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    pub cves: Vec<CveView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CveView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// One node of the flattened criteria tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum CriteriaNodeView {
    Operator {
        depth: usize,
        operator: String,
        negate: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        comment: Option<String>,
    },
    Criterion {
        depth: usize,
        test_ref: String,
        comment: String,
        negate: bool,
        /// Present only when the test, object and state all resolved
        #[serde(skip_serializing_if = "Option::is_none")]
        check: Option<CheckView>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        unresolved: Vec<UnresolvedReference>,
    },
}

impl CriteriaNodeView {
    pub fn depth(&self) -> usize {
        match self {
            CriteriaNodeView::Operator { depth, .. } | CriteriaNodeView::Criterion { depth, .. } => {
                *depth
            }
        }
    }
}

/// A criterion's test with its object and state dereferenced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckView {
    pub test_id: String,
    pub check: String,
    pub object_id: String,
    /// RPM package name inspected by the object
    pub package: String,
    pub state_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evr: Option<ComparisonView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<ComparisonView>,
}
