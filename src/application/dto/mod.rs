/// Data Transfer Objects for application layer
///
/// DTOs carry data between the CLI and the use case, keeping the
/// domain layer unaware of how a run was requested.
mod output_format;
mod report_request;
mod report_response;

pub use output_format::OutputFormat;
pub use report_request::ReportRequest;
pub use report_response::ReportResponse;
