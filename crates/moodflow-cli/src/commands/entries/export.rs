use moodflow_core::EntryStore;

use crate::app::AppContext;
use crate::cli::ExportArgs;
use crate::errors::CliError;
use crate::output::print_json;

/// Write every entry to stdout, newest first.
pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let format = args.format.trim().to_lowercase();
    if format != "json" && format != "jsonl" {
        return Err(CliError::invalid_input_with_hint(
            format!("Unsupported export format: {}", args.format),
            "Hint: Use --format json or --format jsonl.",
        )
        .into());
    }

    let store = ctx.open_journal()?;
    let entries = store.recent(usize::MAX)?;
    tracing::debug!(count = entries.len(), format = %format, "exporting");

    if format == "jsonl" {
        for entry in &entries {
            println!("{}", serde_json::to_string(entry)?);
        }
        Ok(())
    } else {
        print_json(&entries)
    }
}
