use std::path::PathBuf;

use moodflow_core::storage::JsonFileStore;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::{Cli, InitArgs};
use crate::config::{default_journal_path, parse_timezone, write_config, MoodflowConfig};
use crate::errors::CliError;
use crate::helpers::ensure_parent_dir;
use crate::ui::{hint, print, receipt};

pub fn handle_init(ctx: &AppContext, cli: &Cli, args: &InitArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input_with_hint(
            format!("Config already exists at {}", config_path.display()),
            "Hint: Re-run with --force to overwrite it.",
        )
        .into());
    }

    let journal_path = match args.path.as_ref().or(cli.journal.as_ref()) {
        Some(path) => PathBuf::from(path),
        None => default_journal_path()?,
    };

    let timezone = match args.timezone.as_deref() {
        Some(name) => Some(
            parse_timezone(name)
                .map_err(|e| CliError::invalid_input(e.to_string()))?
                .to_string(),
        ),
        None => None,
    };

    let created = if journal_path.exists() {
        false
    } else {
        ensure_parent_dir(&journal_path)?;
        JsonFileStore::create(&journal_path)?;
        true
    };

    write_config(
        &config_path,
        &MoodflowConfig::new(journal_path.clone(), timezone.clone()),
    )?;
    tracing::info!(
        config = %config_path.display(),
        journal = %journal_path.display(),
        "initialized"
    );

    if ctx.quiet() {
        return Ok(());
    }

    let journal_display = journal_path.display().to_string();
    let config_display = config_path.display().to_string();
    let tz_display = timezone.unwrap_or_else(|| "UTC".to_string());
    let title = if created {
        "Journal created"
    } else {
        "Using existing journal"
    };
    print(
        &ui,
        &receipt(
            &ui,
            title,
            &[
                ("Journal", journal_display.as_str()),
                ("Config", config_display.as_str()),
                ("Timezone", tz_display.as_str()),
            ],
        ),
    );
    if ui.mode.is_pretty() {
        print(&ui, &hint(&ui, "moodflow add happy --note \"first entry\""));
    }
    Ok(())
}
