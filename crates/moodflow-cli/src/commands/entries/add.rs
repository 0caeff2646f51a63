use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

use moodflow_core::{EntryStore, MoodKind, NewMoodEntry};

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::errors::CliError;
use crate::helpers::{parse_datetime, parse_mood, save_journal, VALID_MOODS_HINT};
use crate::ui::render::mood_label;
use crate::ui::{format_datetime, print, receipt, UiContext};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false, None);
    let tz = ctx.timezone()?;

    let (mood, prompted_note) = match args.mood.as_deref() {
        Some(value) => (parse_mood(value)?, None),
        None if !args.no_input && ui.is_interactive() => prompt_mood(&ui)?,
        None => {
            return Err(
                CliError::invalid_input_with_hint("No mood given", VALID_MOODS_HINT).into(),
            )
        }
    };

    let mut new_entry = NewMoodEntry::new(mood);
    if let Some(note) = args.note.clone().or(prompted_note) {
        new_entry = new_entry.with_note(note);
    }
    if let Some(date) = args.date.as_deref() {
        new_entry = new_entry.with_created_at(parse_datetime(date, tz)?);
    }

    let mut store = ctx.open_journal()?;
    let entry = store.append(new_entry)?;
    save_journal(&mut store)?;
    tracing::info!(id = %entry.id, mood = %entry.mood, "recorded mood");

    if ctx.quiet() {
        println!("{}", entry.id);
        return Ok(());
    }

    let id = entry.id.to_string();
    let label = if ui.mode.is_pretty() {
        mood_label(&ui, entry.mood)
    } else {
        entry.mood.to_string()
    };
    let when = format_datetime(&entry.created_at, tz, ui.mode.is_pretty());
    let mut items = vec![
        ("ID", id.as_str()),
        ("Mood", label.as_str()),
        ("When", when.as_str()),
    ];
    if let Some(note) = entry.note.as_deref() {
        items.push(("Note", note));
    }
    print(&ui, &receipt(&ui, "Mood saved", &items));
    Ok(())
}

/// Interactive selector with an optional note prompt.
fn prompt_mood(ui: &UiContext) -> anyhow::Result<(MoodKind, Option<String>)> {
    let labels: Vec<String> = MoodKind::ALL.iter().map(|k| mood_label(ui, *k)).collect();
    let theme = ColorfulTheme::default();
    let index = Select::with_theme(&theme)
        .with_prompt("How are you feeling?")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read mood: {}", e))?;
    let note: String = Input::with_theme(&theme)
        .with_prompt("Note (optional)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read note: {}", e))?;

    let note = Some(note).filter(|n| !n.trim().is_empty());
    Ok((MoodKind::ALL[index], note))
}
