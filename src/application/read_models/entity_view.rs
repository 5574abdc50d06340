//! Flattened views of the document's tests, objects and states

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub check: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_existence: Option<String>,
    pub object_ref: String,
    pub state_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evr: Option<ComparisonView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_check: Option<ComparisonView>,
}

/// A requested comparison; only recorded, never evaluated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    pub operation: String,
    pub value: String,
}

impl fmt::Display for ComparisonView {
    /// `less than 0:1.2-3 (evr_string)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operation, self.value)?;
        if let Some(datatype) = &self.datatype {
            write!(f, " ({})", datatype)?;
        }
        Ok(())
    }
}
