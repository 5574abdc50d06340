use crate::oval::domain::Document;
use crate::shared::Result;

/// DocumentParser port for turning raw markup into the document model
///
/// Implementations must be pure: no I/O, no reference resolution. Identifiers
/// are left as lookup keys for the `DocumentIndex`.
pub trait DocumentParser {
    /// Parses a complete OVAL definitions document
    ///
    /// # Errors
    /// Returns `OvalError::MalformedDocument` when the input is not a well-formed
    /// document of the supported subset, and `OvalError::AmbiguousOperator` when a
    /// criteria node lacks a recognizable operator.
    fn parse(&self, bytes: &[u8]) -> Result<Document>;
}
