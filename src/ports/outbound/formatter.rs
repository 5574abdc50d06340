use crate::application::read_models::ReportReadModel;
use crate::shared::Result;

/// ReportFormatter port for rendering the report
///
/// This port abstracts the formatting logic for the supported output formats
/// (plain text, JSON, Markdown).
pub trait ReportFormatter {
    /// Formats the report read model
    ///
    /// # Errors
    /// Returns an error if formatting or serialization fails
    fn format(&self, model: &ReportReadModel) -> Result<String>;
}
