use crate::application::read_models::ReportReadModel;

/// ReportResponse - Internal response DTO from the analyze-document use case
///
/// The parsed document and its index borrow from each other, so the use case
/// flattens them into the owned read model before returning.
#[derive(Debug, Clone)]
pub struct ReportResponse {
    pub read_model: ReportReadModel,
    /// Whether any definition has at least one unresolved reference
    /// Used to determine the exit code in strict mode
    pub has_unresolved_references: bool,
}

impl ReportResponse {
    pub fn new(read_model: ReportReadModel) -> Self {
        let has_unresolved_references = read_model.summary.unresolved_reference_count > 0;
        Self {
            read_model,
            has_unresolved_references,
        }
    }
}
