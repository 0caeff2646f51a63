use moodflow_core::EntryStore;

use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::errors::CliError;
use crate::helpers::parse_entry_id;
use crate::output::print_json;
use crate::ui::render::mood_label;
use crate::ui::{blank_line, divider, format_datetime, header, kv, print, OutputMode};

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let id = parse_entry_id(&args.id)?;
    let ui = ctx.ui_context(args.json, None);
    let tz = ctx.timezone()?;
    let store = ctx.open_journal()?;

    let entry = store.get(&id)?.ok_or_else(|| {
        CliError::not_found(
            "Entry not found",
            "Hint: Run `moodflow list --all` to find entry IDs.",
        )
    })?;

    match ui.mode {
        OutputMode::Json => print_json(&entry)?,
        OutputMode::Pretty => {
            if !ctx.quiet() {
                print(&ui, &header(&ui, "show", None));
                blank_line(&ui);
            }
            print(&ui, &kv(&ui, "ID", &entry.id.to_string()));
            print(&ui, &kv(&ui, "Mood", &mood_label(&ui, entry.mood)));
            print(&ui, &kv(&ui, "Score", &entry.mood.score().to_string()));
            print(
                &ui,
                &kv(&ui, "When", &format_datetime(&entry.created_at, tz, true)),
            );
            if let Some(note) = entry.note.as_deref() {
                blank_line(&ui);
                print(&ui, &divider(&ui));
                blank_line(&ui);
                print(&ui, note);
            }
        }
        OutputMode::Plain => {
            println!("id={}", entry.id);
            println!("mood={}", entry.mood);
            println!("score={}", entry.mood.score());
            println!("created_at={}", entry.created_at.to_rfc3339());
            if let Some(note) = entry.note.as_deref() {
                println!("note={}", note);
            }
        }
    }
    Ok(())
}
