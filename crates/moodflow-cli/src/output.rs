//! Shared printing for entry collections.

use chrono_tz::Tz;
use serde::Serialize;

use moodflow_core::MoodEntry;

use crate::ui::format::single_line;
use crate::ui::render::mood_label;
use crate::ui::{format_datetime, print, short_id, simple_table, truncate, Column, UiContext};

const NOTE_WIDTH: usize = 48;

/// Pretty-print `value` as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One table row per entry. Pretty rows use short ids and local times.
pub fn entry_row(ui: &UiContext, entry: &MoodEntry, tz: Tz) -> Vec<String> {
    let pretty = ui.mode.is_pretty();
    let note = entry.note.as_deref().map(single_line).unwrap_or_default();
    if pretty {
        vec![
            short_id(&entry.id),
            format_datetime(&entry.created_at, tz, true),
            mood_label(ui, entry.mood),
            truncate(&note, NOTE_WIDTH),
        ]
    } else {
        let mut row = vec![
            entry.id.to_string(),
            format_datetime(&entry.created_at, tz, false),
            entry.mood.to_string(),
        ];
        if !note.is_empty() {
            row.push(note);
        }
        row
    }
}

/// List entries in the current output mode.
pub fn print_entry_list(ui: &UiContext, entries: &[MoodEntry], tz: Tz) -> anyhow::Result<()> {
    if ui.mode.is_json() {
        return print_json(entries);
    }
    let columns = [
        Column::new("ID"),
        Column::new("When"),
        Column::new("Mood"),
        Column::new("Note"),
    ];
    let rows: Vec<Vec<String>> = entries.iter().map(|e| entry_row(ui, e, tz)).collect();
    print(ui, &simple_table(ui, &columns, &rows));
    Ok(())
}
