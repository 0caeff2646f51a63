use moodflow_core::EntryStore;

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::constants::DEFAULT_RECENT_LIMIT;
use crate::output::print_entry_list;
use crate::ui::{blank_line, header, hint, print};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json, args.format.as_deref());
    let tz = ctx.timezone()?;
    let store = ctx.open_journal()?;

    let limit = if args.all {
        usize::MAX
    } else {
        args.limit.unwrap_or(DEFAULT_RECENT_LIMIT)
    };
    let entries = store.recent(limit)?;

    if ui.mode.is_json() {
        return print_entry_list(&ui, &entries, tz);
    }

    if ui.mode.is_pretty() && !ctx.quiet() {
        let context = if args.all {
            "all".to_string()
        } else {
            format!("{} recent", entries.len())
        };
        print(&ui, &header(&ui, "list", Some(&context)));
        blank_line(&ui);
    }

    if entries.is_empty() {
        if ui.mode.is_pretty() && !ctx.quiet() {
            print(&ui, "No entries yet.");
            print(&ui, &hint(&ui, "moodflow add happy"));
        }
        return Ok(());
    }

    print_entry_list(&ui, &entries, tz)
}
