use moodflow_core::stats::{today_in, WeeklyPoint};
use moodflow_core::{EntryStore, MoodKind, MoodStats};

use crate::app::AppContext;
use crate::cli::StatsArgs;
use crate::constants::BAR_WIDTH;
use crate::output::print_json;
use crate::ui::render::{bar, mood_label};
use crate::ui::theme::{styled, styles};
use crate::ui::{blank_line, divider, header, kv, print, UiContext};

const LABEL_WIDTH: usize = 8;

pub fn handle_stats(ctx: &AppContext, args: &StatsArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json, args.format.as_deref());
    let tz = ctx.timezone()?;
    let store = ctx.open_journal()?;
    let entries = store.list_all()?;
    let stats = MoodStats::compute(&entries, today_in(&tz), &tz);

    if ui.mode.is_json() {
        return print_json(&stats);
    }
    if ui.mode.is_pretty() {
        print_dashboard(&ui, &stats, ctx.quiet());
    } else {
        print_plain(&stats);
    }
    Ok(())
}

fn print_dashboard(ui: &UiContext, stats: &MoodStats, quiet: bool) {
    if !quiet {
        print(ui, &header(ui, "stats", None));
        blank_line(ui);
    }

    let streak = match stats.streak_count {
        1 => "1 day".to_string(),
        n => format!("{} days", n),
    };
    print(ui, &kv(ui, "Total entries", &stats.total_entries.to_string()));
    print(ui, &kv(ui, "Current streak", &streak));
    print(ui, &kv(ui, "This week", &stats.this_week.to_string()));
    print(
        ui,
        &kv(ui, "Most frequent", &mood_label(ui, stats.average_mood)),
    );

    blank_line(ui);
    print(ui, &styled("Distribution", styles::bold(), ui.color));
    let max = stats
        .mood_distribution
        .iter()
        .map(|(_, count)| count)
        .max()
        .unwrap_or(0);
    for (kind, count) in stats.mood_distribution.iter() {
        print(
            ui,
            &format!(
                "  {}{} {} {}",
                mood_label(ui, kind),
                " ".repeat(LABEL_WIDTH.saturating_sub(kind.label().len())),
                bar(ui, kind, count, max, BAR_WIDTH),
                count
            ),
        );
    }

    blank_line(ui);
    print(ui, &styled("Last 7 days", styles::bold(), ui.color));
    for point in &stats.weekly_data {
        print(ui, &format!("  {}", weekly_line(ui, point)));
    }
    blank_line(ui);
    print(ui, &divider(ui));
}

fn weekly_line(ui: &UiContext, point: &WeeklyPoint) -> String {
    let date = styled(&point.date.format("%m-%d").to_string(), styles::dim(), ui.color);
    match kind_for_score(point.score) {
        Some(kind) => format!(
            "{} {}  {} {}",
            point.day,
            date,
            bar(ui, kind, point.score as usize, 5, 5),
            point.score
        ),
        None => format!(
            "{} {}  {} -",
            point.day,
            date,
            styled(&".".repeat(5), styles::dim(), ui.color)
        ),
    }
}

/// The kind whose fixed score equals `score`; 0 means no entries that day.
fn kind_for_score(score: u8) -> Option<MoodKind> {
    MoodKind::ALL.into_iter().find(|kind| kind.score() == score)
}

fn print_plain(stats: &MoodStats) {
    println!("total_entries={}", stats.total_entries);
    println!("streak={}", stats.streak_count);
    println!("this_week={}", stats.this_week);
    println!("average_mood={}", stats.average_mood);
    for (kind, count) in stats.mood_distribution.iter() {
        println!("count.{}={}", kind, count);
    }
    for point in &stats.weekly_data {
        println!("week.{}={}", point.date, point.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_for_score() {
        assert_eq!(kind_for_score(0), None);
        assert_eq!(kind_for_score(1), Some(MoodKind::Angry));
        assert_eq!(kind_for_score(5), Some(MoodKind::Excited));
    }
}
