//! Statistics engine.
//!
//! Pure functions over a slice of entries. Every instant is bucketed into a
//! calendar day in a caller-supplied time zone, and "today" is always passed
//! in, so results are deterministic for a given input.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::mood::MoodKind;
use crate::storage::types::{MoodEntry, MoodRecord};

/// Number of days in the analytics window.
pub const WINDOW_DAYS: u64 = 7;

/// Per-kind entry counts. Every kind is present, zero-filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoodDistribution([usize; 5]);

impl MoodDistribution {
    pub fn get(&self, kind: MoodKind) -> usize {
        self.0[kind.index()]
    }

    /// Counts in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (MoodKind, usize)> + '_ {
        MoodKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    fn increment(&mut self, kind: MoodKind) {
        self.0[kind.index()] += 1;
    }
}

impl Serialize for MoodDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(MoodKind::ALL.len()))?;
        for (kind, count) in self.iter() {
            map.serialize_entry(kind.as_str(), &count)?;
        }
        map.end()
    }
}

/// One day of the weekly trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyPoint {
    /// Short weekday name of `date` ("Mon".."Sun")
    pub day: String,
    pub date: NaiveDate,
    /// Rounded average mood score, 0 when the day has no entries
    pub score: u8,
}

/// Dashboard snapshot derived from a full entry collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodStats {
    pub total_entries: usize,
    pub mood_distribution: MoodDistribution,
    pub average_mood: MoodKind,
    pub streak_count: u32,
    pub this_week: usize,
    pub weekly_data: Vec<WeeklyPoint>,
}

impl MoodStats {
    /// Compute every statistic; the weekly trend covers `today - 6 ..= today`.
    pub fn compute<Tz: TimeZone>(entries: &[MoodEntry], today: NaiveDate, tz: &Tz) -> Self {
        let mood_distribution = compute_distribution(entries);
        MoodStats {
            total_entries: entries.len(),
            average_mood: compute_average_mood(&mood_distribution),
            mood_distribution,
            streak_count: compute_streak(entries, today, tz),
            this_week: compute_this_week(entries, today, tz),
            weekly_data: compute_weekly_trend(entries, window_start(today), tz),
        }
    }
}

/// Server-mode per-day aggregate over stored scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyScore {
    pub date: NaiveDate,
    /// Rounded to 2 decimals
    pub avg_score: f64,
    pub entries_count: u32,
}

/// The current calendar day in `tz`.
pub fn today_in<Tz: TimeZone>(tz: &Tz) -> NaiveDate {
    Utc::now().with_timezone(tz).date_naive()
}

fn day_of<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    at.with_timezone(tz).date_naive()
}

fn window_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(WINDOW_DAYS - 1))
        .unwrap_or(NaiveDate::MIN)
}

pub fn compute_distribution(entries: &[MoodEntry]) -> MoodDistribution {
    let mut distribution = MoodDistribution::default();
    for entry in entries {
        distribution.increment(entry.mood);
    }
    distribution
}

/// Most frequent kind. Ties go to the earliest kind in enumeration order, and
/// an empty distribution yields `Happy`.
pub fn compute_average_mood(distribution: &MoodDistribution) -> MoodKind {
    let mut best = MoodKind::Happy;
    let mut best_count = 0;
    for (kind, count) in distribution.iter() {
        if count > best_count {
            best = kind;
            best_count = count;
        }
    }
    best
}

/// Consecutive days ending at `today` with at least one entry.
///
/// Zero when there is no entry today. Entries after `today` are ignored.
pub fn compute_streak<Tz: TimeZone>(entries: &[MoodEntry], today: NaiveDate, tz: &Tz) -> u32 {
    let days: HashSet<NaiveDate> = entries.iter().map(|e| day_of(&e.created_at, tz)).collect();

    let mut streak = 0;
    let mut candidate = Some(today);
    while let Some(day) = candidate {
        if !days.contains(&day) {
            break;
        }
        streak += 1;
        candidate = day.pred_opt();
    }
    streak
}

/// Entries whose day falls in `[today - 6, today]`.
pub fn compute_this_week<Tz: TimeZone>(entries: &[MoodEntry], today: NaiveDate, tz: &Tz) -> usize {
    let start = window_start(today);
    entries
        .iter()
        .map(|e| day_of(&e.created_at, tz))
        .filter(|day| *day >= start && *day <= today)
        .count()
}

/// Seven daily points starting at `week_start`.
pub fn compute_weekly_trend<Tz: TimeZone>(
    entries: &[MoodEntry],
    week_start: NaiveDate,
    tz: &Tz,
) -> Vec<WeeklyPoint> {
    let mut totals: BTreeMap<NaiveDate, (u32, u32)> = BTreeMap::new();
    for entry in entries {
        let slot = totals.entry(day_of(&entry.created_at, tz)).or_default();
        slot.0 += u32::from(entry.mood.score());
        slot.1 += 1;
    }

    week_start
        .iter_days()
        .take(WINDOW_DAYS as usize)
        .map(|date| {
            let score = match totals.get(&date) {
                Some(&(sum, count)) if count > 0 => round_half_up(sum, count),
                _ => 0,
            };
            WeeklyPoint {
                day: date.format("%a").to_string(),
                date,
                score,
            }
        })
        .collect()
}

/// `sum / count` rounded half up, in integers.
fn round_half_up(sum: u32, count: u32) -> u8 {
    ((2 * sum + count) / (2 * count)) as u8
}

/// Per-day average of stored scores over the trailing window, newest day first.
/// Days without records are omitted.
pub fn daily_score_trend<Tz: TimeZone>(
    records: &[MoodRecord],
    today: NaiveDate,
    tz: &Tz,
) -> Vec<DailyScore> {
    let start = window_start(today);
    let mut totals: BTreeMap<NaiveDate, (u32, u32)> = BTreeMap::new();
    for record in records {
        let day = day_of(&record.created_at, tz);
        if day < start || day > today {
            continue;
        }
        let slot = totals.entry(day).or_default();
        slot.0 += u32::from(record.mood_score);
        slot.1 += 1;
    }

    totals
        .into_iter()
        .rev()
        .map(|(date, (sum, count))| DailyScore {
            date,
            avg_score: (f64::from(sum) / f64::from(count) * 100.0).round() / 100.0,
            entries_count: count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime};
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    fn at(date: NaiveDate, hour: u32) -> DateTime<Utc> {
        date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
            .and_utc()
    }

    fn entry(mood: MoodKind, days_ago: i64) -> MoodEntry {
        MoodEntry {
            id: Uuid::new_v4(),
            mood,
            note: None,
            created_at: at(today() - Duration::days(days_ago), 12),
        }
    }

    #[test]
    fn test_distribution_zero_filled() {
        let distribution = compute_distribution(&[]);
        for kind in MoodKind::ALL {
            assert_eq!(distribution.get(kind), 0);
        }
        assert_eq!(distribution.total(), 0);
    }

    #[test]
    fn test_distribution_serializes_all_kinds_in_order() {
        let distribution = compute_distribution(&[entry(MoodKind::Calm, 0)]);
        let json = serde_json::to_string(&distribution).unwrap();
        assert_eq!(
            json,
            r#"{"happy":0,"sad":0,"angry":0,"calm":1,"excited":0}"#
        );
    }

    #[test]
    fn test_average_mood_tie_goes_to_enumeration_order() {
        let entries = vec![
            entry(MoodKind::Excited, 0),
            entry(MoodKind::Sad, 0),
            entry(MoodKind::Excited, 1),
            entry(MoodKind::Sad, 1),
        ];
        let distribution = compute_distribution(&entries);
        assert_eq!(compute_average_mood(&distribution), MoodKind::Sad);
    }

    #[test]
    fn test_average_mood_empty_is_happy() {
        assert_eq!(
            compute_average_mood(&MoodDistribution::default()),
            MoodKind::Happy
        );
    }

    #[test]
    fn test_streak_cases() {
        assert_eq!(compute_streak(&[], today(), &Utc), 0);
        assert_eq!(
            compute_streak(&[entry(MoodKind::Happy, 0)], today(), &Utc),
            1
        );
        let gap = vec![
            entry(MoodKind::Happy, 0),
            entry(MoodKind::Happy, 1),
            entry(MoodKind::Happy, 3),
        ];
        assert_eq!(compute_streak(&gap, today(), &Utc), 2);
    }

    #[test]
    fn test_streak_zero_without_entry_today() {
        let entries = vec![entry(MoodKind::Calm, 1), entry(MoodKind::Calm, 2)];
        assert_eq!(compute_streak(&entries, today(), &Utc), 0);
    }

    #[test]
    fn test_streak_counts_days_not_entries() {
        let entries = vec![
            entry(MoodKind::Calm, 0),
            entry(MoodKind::Sad, 0),
            entry(MoodKind::Angry, 0),
        ];
        assert_eq!(compute_streak(&entries, today(), &Utc), 1);
    }

    #[test]
    fn test_future_entries_are_ignored() {
        let entries = vec![entry(MoodKind::Happy, -1)];
        assert_eq!(compute_streak(&entries, today(), &Utc), 0);
        assert_eq!(compute_this_week(&entries, today(), &Utc), 0);
    }

    #[test]
    fn test_this_week_window_is_inclusive() {
        let entries = vec![
            entry(MoodKind::Happy, 0),
            entry(MoodKind::Happy, 6),
            entry(MoodKind::Happy, 7),
        ];
        assert_eq!(compute_this_week(&entries, today(), &Utc), 2);
    }

    #[test]
    fn test_this_week_ignores_out_of_window_growth() {
        let mut entries = vec![entry(MoodKind::Happy, 2)];
        let before = compute_this_week(&entries, today(), &Utc);
        entries.push(entry(MoodKind::Sad, 30));
        assert_eq!(compute_this_week(&entries, today(), &Utc), before);
        entries.push(entry(MoodKind::Sad, 3));
        assert_eq!(compute_this_week(&entries, today(), &Utc), before + 1);
    }

    #[test]
    fn test_weekly_trend_rounds_half_up() {
        // happy (4) + excited (5) = 4.5 -> 5; calm (3) + happy (4) = 3.5 -> 4
        let entries = vec![
            entry(MoodKind::Happy, 0),
            entry(MoodKind::Excited, 0),
            entry(MoodKind::Calm, 1),
            entry(MoodKind::Happy, 1),
        ];
        let trend = compute_weekly_trend(&entries, window_start(today()), &Utc);
        assert_eq!(trend[6].score, 5);
        assert_eq!(trend[5].score, 4);
        assert_eq!(trend[0].score, 0);
    }

    #[test]
    fn test_weekly_trend_labels_follow_dates() {
        let trend = compute_weekly_trend(&[], window_start(today()), &Utc);
        assert_eq!(trend.len(), 7);
        // 2024-03-14 is a Thursday
        assert_eq!(trend[6].date, today());
        assert_eq!(trend[6].day, "Thu");
        assert_eq!(trend[0].day, "Fri");
    }

    #[test]
    fn test_weekly_trend_always_seven_buckets() {
        let many: Vec<MoodEntry> = (0..1000)
            .map(|i| entry(MoodKind::ALL[i % 5], (i % 20) as i64))
            .collect();
        assert_eq!(
            compute_weekly_trend(&many, window_start(today()), &Utc).len(),
            7
        );
    }

    #[test]
    fn test_scenario_two_happy_one_sad() {
        let entries = vec![
            entry(MoodKind::Happy, 0),
            entry(MoodKind::Happy, 0),
            entry(MoodKind::Sad, 1),
        ];
        let stats = MoodStats::compute(&entries, today(), &Utc);

        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.mood_distribution.get(MoodKind::Happy), 2);
        assert_eq!(stats.mood_distribution.get(MoodKind::Sad), 1);
        assert_eq!(stats.mood_distribution.get(MoodKind::Angry), 0);
        assert_eq!(stats.mood_distribution.get(MoodKind::Calm), 0);
        assert_eq!(stats.mood_distribution.get(MoodKind::Excited), 0);
        assert_eq!(stats.average_mood, MoodKind::Happy);
        assert_eq!(stats.streak_count, 2);
        assert_eq!(stats.this_week, 3);
        assert_eq!(stats.mood_distribution.total(), stats.total_entries);
    }

    #[test]
    fn test_scenario_empty() {
        let stats = MoodStats::compute(&[], today(), &Utc);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.streak_count, 0);
        assert_eq!(stats.this_week, 0);
        assert_eq!(stats.weekly_data.len(), 7);
        assert!(stats.weekly_data.iter().all(|p| p.score == 0));
    }

    #[test]
    fn test_stats_serialize_camel_case() {
        let stats = MoodStats::compute(&[entry(MoodKind::Sad, 0)], today(), &Utc);
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["totalEntries"], 1);
        assert_eq!(value["averageMood"], "sad");
        assert_eq!(value["streakCount"], 1);
        assert_eq!(value["thisWeek"], 1);
        assert_eq!(value["moodDistribution"]["sad"], 1);
        assert_eq!(value["weeklyData"][6]["date"], "2024-03-14");
    }

    #[test]
    fn test_day_bucketing_uses_time_zone() {
        // 02:00 UTC on the 14th is still the 13th in New York.
        let late = MoodEntry {
            id: Uuid::new_v4(),
            mood: MoodKind::Calm,
            note: None,
            created_at: at(today(), 2),
        };
        let ny = chrono_tz::America::New_York;
        assert_eq!(compute_streak(&[late.clone()], today(), &ny), 0);
        assert_eq!(
            compute_streak(&[late], today() - Duration::days(1), &ny),
            1
        );
    }

    #[test]
    fn test_daily_score_trend_newest_first() {
        let user_id = Uuid::new_v4();
        let record = |score: u8, days_ago: i64| MoodRecord {
            id: Uuid::new_v4(),
            user_id,
            mood_type: MoodKind::Happy,
            emoji: String::new(),
            note: None,
            mood_score: score,
            created_at: at(today() - Duration::days(days_ago), 9),
        };
        let records = vec![record(5, 0), record(2, 0), record(3, 2), record(1, 10)];

        let trend = daily_score_trend(&records, today(), &Utc);

        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].date, today());
        assert_eq!(trend[0].avg_score, 3.5);
        assert_eq!(trend[0].entries_count, 2);
        assert_eq!(trend[1].avg_score, 3.0);
    }
}
