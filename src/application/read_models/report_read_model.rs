//! Report read model for query operations
//!
//! Aggregates everything a formatter needs into owned, serializable views so
//! that formatters never touch the borrowed document index.

use super::definition_view::DefinitionView;
use super::entity_view::{ObjectView, StateView, TestView};
use serde::Serialize;

/// Main read model for an analyzed OVAL document
#[derive(Debug, Clone, Serialize)]
pub struct ReportReadModel {
    /// Report metadata (tool, source document, generation time)
    pub metadata: ReportMetadataView,
    /// Producer block of the document, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<GeneratorView>,
    /// Definitions in document order, each with its resolved criteria tree
    pub definitions: Vec<DefinitionView>,
    pub tests: Vec<TestView>,
    pub objects: Vec<ObjectView>,
    pub states: Vec<StateView>,
    pub summary: ReportSummary,
}

/// View representation of report metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMetadataView {
    pub tool_name: String,
    pub tool_version: String,
    /// Document path as given on the command line
    pub source: String,
    /// RFC 3339 timestamp of the run
    pub generated_at: String,
}

/// View representation of the document `<generator>` block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratorView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Aggregate counts over the whole report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub definition_count: usize,
    pub resolved_definition_count: usize,
    pub unresolved_definition_count: usize,
    pub test_count: usize,
    pub object_count: usize,
    pub state_count: usize,
    /// Criteria leaves that resolved to a full test/object/state check
    pub resolved_check_count: usize,
    pub unresolved_reference_count: usize,
}
