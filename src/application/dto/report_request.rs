use crate::oval::services::ResolutionPolicy;
use std::path::PathBuf;

/// ReportRequest - Internal request DTO for the analyze-document use case
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Path to the OVAL definitions document
    pub document_path: PathBuf,
    /// How broken references inside one definition are handled
    pub policy: ResolutionPolicy,
}

impl ReportRequest {
    pub fn new(document_path: PathBuf, policy: ResolutionPolicy) -> Self {
        Self {
            document_path,
            policy,
        }
    }
}
