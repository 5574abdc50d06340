/// Mock implementations for testing
mod mock_document_reader;
mod mock_progress_reporter;

pub use mock_document_reader::MockDocumentReader;
pub use mock_progress_reporter::MockProgressReporter;
