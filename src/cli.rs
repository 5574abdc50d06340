use crate::application::dto::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Resolve the criteria trees of an OVAL RPM-info definitions document
#[derive(Parser, Debug)]
#[command(name = "oval-rpm")]
#[command(version)]
#[command(
    about = "Resolve the criteria trees of an OVAL RPM-info definitions document",
    long_about = None
)]
pub struct Args {
    /// Path to the OVAL definitions document (XML)
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Output format: text, json or markdown [default: text]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Config file path (default: oval-rpm.config.yml next to the document)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Exit with code 1 when any definition has unresolved references
    #[arg(long)]
    pub strict: bool,

    /// Stop resolving a definition at its first unresolved criterion
    #[arg(long)]
    pub fail_fast: bool,

    /// Suppress progress messages on stderr (errors and warnings are kept)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
