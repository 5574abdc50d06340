//! Configuration file support for oval-rpm.
//!
//! Provides YAML-based configuration through `oval-rpm.config.yml` files,
//! including data structures, file loading, validation, and merging with
//! command-line arguments.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::application::dto::OutputFormat;
use crate::cli::Args;
use crate::oval::services::ResolutionPolicy;
use crate::shared::error::OvalError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "oval-rpm.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub strict: Option<bool>,
    pub fail_fast: Option<bool>,
    pub quiet: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// The configured output format, if any.
    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.format
            .as_deref()
            .map(|format| {
                format.parse::<OutputFormat>().map_err(|message| {
                    OvalError::InvalidUsage {
                        message: format!("config field 'format': {}", message),
                    }
                    .into()
                })
            })
            .transpose()
    }
}

/// Effective settings for one run after merging CLI arguments over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub format: OutputFormat,
    pub strict: bool,
    pub policy: ResolutionPolicy,
    pub quiet: bool,
}

/// Merges CLI arguments over config values.
///
/// An explicit `--format` wins over the config file. Boolean flags can only be
/// switched on from the command line, so a config value of `true` stays in effect.
pub fn merge_options(args: &Args, config: Option<&ConfigFile>) -> Result<RunOptions> {
    let configured_format = match config {
        Some(config) => config.output_format()?,
        None => None,
    };
    let flag = |cli: bool, configured: fn(&ConfigFile) -> Option<bool>| {
        cli || config.and_then(configured).unwrap_or(false)
    };

    let fail_fast = flag(args.fail_fast, |c| c.fail_fast);
    Ok(RunOptions {
        format: args.format.or(configured_format).unwrap_or_default(),
        strict: flag(args.strict, |c| c.strict),
        policy: if fail_fast {
            ResolutionPolicy::FailFast
        } else {
            ResolutionPolicy::CollectAll
        },
        quiet: flag(args.quiet, |c| c.quiet),
    })
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // An empty file is a valid, empty config
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.is_file() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Loads the explicit `--config` file, or discovers one next to the document.
pub fn load_for_args(args: &Args) -> Result<Option<ConfigFile>> {
    if let Some(path) = &args.config {
        return load_config_from_path(path).map(Some);
    }

    let dir = match args.document.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    discover_config(dir)
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    config.output_format()?;
    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!("⚠️  Warning: Unknown config field '{}' will be ignored.", key);
    }
}
