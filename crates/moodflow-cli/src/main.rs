//! Moodflow CLI - a local mood journal in your terminal
//!
//! Command-line front end over the JSON journal in `moodflow-core`.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands, ListArgs};
use crate::commands::{entries, init, misc, stats};
use crate::errors::exit_code_for;
use crate::ui::render::print_error;

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context(false, None);
        let error_msg = format!("{}", e);
        let (message, hint) = split_hint(&error_msg);
        let hint = hint
            .or_else(|| contextual_hint(message))
            .map(|h| h.trim_start_matches("Hint:").trim().to_string());

        print_error(&ui_ctx, message, hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

/// Logs go to stderr so they never mix with command output.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("MOODFLOW_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Split "message\nHint: ..." into its two halves.
fn split_hint(error: &str) -> (&str, Option<String>) {
    match error.find("\nHint:") {
        Some(idx) => (&error[..idx], Some(error[idx + 1..].to_string())),
        None => (error, None),
    }
}

fn contextual_hint(error: &str) -> Option<String> {
    let error_lower = error.to_lowercase();

    if error_lower.contains("not valid json") {
        return Some(
            "Hint: The journal file is left untouched. Fix or move it, then retry.".to_string(),
        );
    }
    if error_lower.contains("unknown mood") {
        return Some(helpers::VALID_MOODS_HINT.to_string());
    }
    if error_lower.contains("invalid timezone") {
        return Some("Hint: Use an IANA name such as Europe/Berlin or UTC.".to_string());
    }
    if error_lower.contains("failed to parse config") {
        return Some("Hint: Run `moodflow init --force` to rewrite the config.".to_string());
    }

    None
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => init::handle_init(ctx, cli, args),
        Some(Commands::Add(args)) => entries::handle_add(ctx, args),
        Some(Commands::List(args)) => entries::handle_list(ctx, args),
        Some(Commands::Show(args)) => entries::handle_show(ctx, args),
        Some(Commands::Stats(args)) => stats::handle_stats(ctx, args),
        Some(Commands::Export(args)) => entries::handle_export(ctx, args),
        Some(Commands::Completions { shell }) => misc::handle_completions(*shell),
        // Bare `moodflow` is the home view: the most recent entries.
        None => entries::handle_list(
            ctx,
            &ListArgs {
                limit: None,
                all: false,
                json: false,
                format: None,
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_hint() {
        let (message, hint) = split_hint("Entry not found\nHint: Run `moodflow list`");
        assert_eq!(message, "Entry not found");
        assert_eq!(hint.as_deref(), Some("Hint: Run `moodflow list`"));

        let (message, hint) = split_hint("boom");
        assert_eq!(message, "boom");
        assert!(hint.is_none());
    }

    #[test]
    fn test_contextual_hint() {
        assert!(contextual_hint("Journal at x is not valid JSON: eof").is_some());
        assert!(contextual_hint("Invalid timezone: Mars/Base").is_some());
        assert!(contextual_hint("something else").is_none());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
