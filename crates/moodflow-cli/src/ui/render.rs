//! Rendering primitives shared by every command.

use comfy_table::presets::NOTHING;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use moodflow_core::MoodKind;

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{mood_style, styled, styles, Badge};

/// Command header.
///
/// Pretty: "Moodflow · command (context)". Plain: "moodflow command".
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let title = styled("Moodflow", styles::bold(), ctx.color);
            match context {
                Some(c) => format!("{} \u{00B7} {} ({})", title, command, c),
                None => format!("{} \u{00B7} {}", title, command),
            }
        }
        OutputMode::Plain => format!("moodflow {}", command),
        OutputMode::Json => String::new(),
    }
}

pub fn divider(ctx: &UiContext) -> String {
    if ctx.mode.is_pretty() {
        let glyph = if ctx.unicode { "\u{2500}" } else { "-" };
        glyph.repeat(ctx.width.min(60))
    } else {
        "---".to_string()
    }
}

pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let colored = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        colored
    } else {
        format!("{} {}", colored, message)
    }
}

/// Key-value pair. Pretty: "Key: value". Plain: "key=value".
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", styled("Hint:", styles::dim(), ctx.color), text)
    } else {
        format!("hint={}", text)
    }
}

/// Summary block printed after a write.
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, &str)]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Ok, title));
        lines.extend(items.iter().map(|(k, v)| format!("  {}", kv(ctx, k, v))));
    } else {
        lines.push("status=ok".to_string());
        lines.extend(items.iter().map(|(k, v)| kv(ctx, k, v)));
    }
    lines.join("\n")
}

/// Mood label in its palette color, prefixed by the emoji when unicode is on.
pub fn mood_label(ctx: &UiContext, kind: MoodKind) -> String {
    let label = styled(kind.label(), mood_style(kind), ctx.color);
    if ctx.unicode {
        format!("{} {}", kind.emoji(), label)
    } else {
        label
    }
}

/// Horizontal bar proportional to `value / max`, `width` cells wide.
pub fn bar(ctx: &UiContext, kind: MoodKind, value: usize, max: usize, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        (value * width + max / 2) / max
    };
    let (full, empty) = if ctx.unicode {
        ("\u{2588}", "\u{2591}")
    } else {
        ("#", ".")
    };
    format!(
        "{}{}",
        styled(&full.repeat(filled), mood_style(kind), ctx.color),
        styled(&empty.repeat(width - filled.min(width)), styles::dim(), ctx.color)
    )
}

#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self { header }
    }
}

/// Borderless table. Plain mode drops the header and joins cells with spaces.
pub fn simple_table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join(" "))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(columns.iter().map(|c| {
        let cell = Cell::new(c.header);
        if ctx.color {
            cell.add_attribute(Attribute::Dim)
        } else {
            cell
        }
    }));
    for i in 0..columns.len() {
        if let Some(column) = table.column_mut(i) {
            column.set_padding((0, 2));
        }
    }
    for row in rows {
        table.add_row(row);
    }
    table.to_string()
}

/// Print unless the command is in JSON mode.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() {
        println!("{}", message);
    }
}

pub fn blank_line(ctx: &UiContext) {
    if ctx.mode.is_pretty() {
        println!();
    }
}

pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = Vec::new();
    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Err, message));
        if let Some(h) = error_hint {
            lines.push(hint(ctx, h));
        }
    } else {
        lines.push(format!("error={}", message));
        if let Some(h) = error_hint {
            lines.push(format!("hint={}", h));
        }
    }
    lines.join("\n")
}

pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}
