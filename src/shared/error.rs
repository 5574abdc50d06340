use crate::oval::services::DuplicateIdentifier;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - report rendered (broken references are flagged in the report)
    Success = 0,
    /// Report rendered, but at least one definition had unresolved references (strict mode)
    UnresolvedReferences = 1,
    /// Invalid command-line arguments (clap parsing errors, invalid configured format)
    InvalidArguments = 2,
    /// Application error (file I/O, malformed document, duplicate identifiers, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::UnresolvedReferences => write!(f, "Unresolved References (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for OVAL document processing.
///
/// Uses thiserror to derive Display and Error traits automatically.
/// Unresolved references are not part of this enum: they are collected per
/// definition and reported inside the rendered output instead of aborting.
#[derive(Debug, Error)]
pub enum OvalError {
    #[error("OVAL document not found: {path}\n\n💡 Hint: Please verify the path passed as the first argument")]
    DocumentNotFound { path: PathBuf },

    #[error("Failed to read OVAL document: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    DocumentReadError { path: PathBuf, details: String },

    #[error("Malformed OVAL document\nDetails: {details}\n\n💡 Hint: Please verify that the file is a well-formed OVAL definitions document")]
    MalformedDocument { details: String },

    #[error("Ambiguous criteria operator in definition '{definition}': {}\n\n💡 Hint: Every <criteria> element must carry operator=\"AND\", \"OR\", \"ONE\" or \"XOR\"", describe_operator(.value))]
    AmbiguousOperator {
        definition: String,
        value: Option<String>,
    },

    #[error("Duplicate identifiers found in document:\n{}", format_duplicates(.duplicates))]
    DuplicateIdentifiers { duplicates: Vec<DuplicateIdentifier> },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid usage: {message}")]
    InvalidUsage { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl OvalError {
    /// Exit code reported by the CLI when this error aborts a run
    pub fn exit_code(&self) -> ExitCode {
        match self {
            OvalError::InvalidUsage { .. } => ExitCode::InvalidArguments,
            _ => ExitCode::ApplicationError,
        }
    }
}

fn describe_operator(value: &Option<String>) -> String {
    match value {
        Some(value) => format!("unrecognized operator '{}'", value),
        None => "operator attribute is missing".to_string(),
    }
}

fn format_duplicates(duplicates: &[DuplicateIdentifier]) -> String {
    duplicates
        .iter()
        .map(|d| format!("  - {}", d))
        .collect::<Vec<_>>()
        .join("\n")
}
