/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, markup parser, console, etc.).
pub mod document_parser;
pub mod document_reader;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;

pub use document_parser::DocumentParser;
pub use document_reader::DocumentReader;
pub use formatter::ReportFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
