//! Path and timezone resolution for the journal.

use std::path::PathBuf;

use chrono_tz::Tz;

use crate::cli::Cli;
use crate::config::{default_config_path, default_journal_path, parse_timezone, read_config};

/// Where the journal lives and which day boundaries apply.
#[derive(Debug, Clone)]
pub struct Settings {
    pub journal_path: PathBuf,
    pub timezone: Tz,
}

/// Resolve the config file path, checking `MOODFLOW_CONFIG` first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("MOODFLOW_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// `--journal` / `MOODFLOW_PATH` beats the config file, which beats the XDG
/// default. A missing config file is not an error.
pub fn resolve_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let config_path = resolve_config_path()?;
    let config = if config_path.exists() {
        Some(read_config(&config_path)?)
    } else {
        None
    };

    let journal_path = match (&cli.journal, &config) {
        (Some(path), _) => PathBuf::from(path),
        (None, Some(config)) => PathBuf::from(&config.journal.path),
        (None, None) => default_journal_path()?,
    };

    let timezone = match config.as_ref().and_then(|c| c.ui.timezone.as_deref()) {
        Some(name) => parse_timezone(name)?,
        None => chrono_tz::UTC,
    };

    tracing::debug!(
        journal = %journal_path.display(),
        timezone = %timezone,
        "resolved settings"
    );

    Ok(Settings {
        journal_path,
        timezone,
    })
}
