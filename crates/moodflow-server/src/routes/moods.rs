use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use moodflow_core::mood::validate_score;
use moodflow_core::stats::{daily_score_trend, today_in, DailyScore};
use moodflow_core::storage::{MoodRecord, MoodSummary, MoodUpdate, NewMoodRecord};
use moodflow_core::{EntryStore, MoodKind, MoodStats};

use crate::error::{ApiError, ApiResult};
use crate::extract::{parse_id, present};
use crate::response::Envelope;
use crate::state::AppState;

const MISSING_CREATE_FIELDS: &str =
    "Missing required fields: user_id, mood_type, emoji, mood_score";
const MISSING_UPDATE_FIELDS: &str = "Missing required fields: mood_type, emoji, mood_score";
const MOOD_NOT_FOUND: &str = "Mood entry not found";

#[derive(Debug, Deserialize)]
pub struct CreateMoodBody {
    user_id: Option<String>,
    mood_type: Option<String>,
    emoji: Option<String>,
    note: Option<String>,
    mood_score: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMoodBody {
    mood_type: Option<String>,
    emoji: Option<String>,
    note: Option<String>,
    mood_score: Option<i64>,
}

/// A score of 0 counts as missing, like an absent field.
fn score_field(score: Option<i64>) -> Option<i64> {
    score.filter(|s| *s != 0)
}

pub async fn create_mood(
    State(state): State<AppState>,
    payload: Result<Json<CreateMoodBody>, JsonRejection>,
) -> ApiResult<Envelope<MoodRecord>> {
    let Json(body) = payload?;
    let (Some(user_id), Some(mood_type), Some(emoji), Some(score)) = (
        present(body.user_id),
        present(body.mood_type),
        present(body.emoji),
        score_field(body.mood_score),
    ) else {
        return Err(ApiError::bad_request(MISSING_CREATE_FIELDS));
    };

    let score = validate_score(score)?;
    let user_id = parse_id(&user_id, "user id")?;
    let kind: MoodKind = mood_type.parse()?;

    let new_record = NewMoodRecord::new(user_id, kind, score)
        .with_emoji(emoji)
        .with_note(body.note);
    let record = state
        .with_store(move |store| store.insert_mood(&new_record))
        .await?;
    tracing::info!(mood_id = %record.id, user_id = %user_id, "mood created");

    Ok(Envelope::created(record).message("Mood entry created successfully"))
}

pub async fn list_user_moods(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Envelope<Vec<MoodRecord>>> {
    let user_id = parse_id(&user_id, "user id")?;
    let moods = state
        .with_store(move |store| store.moods_for_user(&user_id))
        .await?;
    let count = moods.len();
    Ok(Envelope::data(moods).count(count))
}

pub async fn mood_stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Envelope<MoodSummary>> {
    let user_id = parse_id(&user_id, "user id")?;
    let summary = state
        .with_store(move |store| store.mood_summary(&user_id))
        .await?;
    Ok(Envelope::data(summary))
}

pub async fn weekly_trend(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Envelope<Vec<DailyScore>>> {
    let user_id = parse_id(&user_id, "user id")?;
    let records = state
        .with_store(move |store| store.moods_for_user(&user_id))
        .await?;
    let trend = daily_score_trend(&records, today_in(&state.timezone), &state.timezone);
    Ok(Envelope::data(trend))
}

/// The dashboard snapshot for one account, computed like the local journal's.
pub async fn mood_summary(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Envelope<MoodStats>> {
    let user_id = parse_id(&user_id, "user id")?;
    let entries = state
        .with_store(move |store| store.journal(user_id).list_all())
        .await?;
    let stats = MoodStats::compute(&entries, today_in(&state.timezone), &state.timezone);
    Ok(Envelope::data(stats))
}

pub async fn update_mood(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateMoodBody>, JsonRejection>,
) -> ApiResult<Envelope> {
    let id = parse_id(&id, "mood id")?;
    let Json(body) = payload?;
    let (Some(mood_type), Some(emoji), Some(score)) = (
        present(body.mood_type),
        present(body.emoji),
        score_field(body.mood_score),
    ) else {
        return Err(ApiError::bad_request(MISSING_UPDATE_FIELDS));
    };

    let update = MoodUpdate {
        mood_type: mood_type.parse()?,
        emoji,
        note: body.note,
        mood_score: validate_score(score)?,
    };
    let changes = state
        .with_store(move |store| store.update_mood(&id, &update))
        .await?;
    if changes == 0 {
        return Err(ApiError::not_found(MOOD_NOT_FOUND));
    }

    Ok(Envelope::ok()
        .message("Mood entry updated successfully")
        .changes(changes))
}

pub async fn delete_mood(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Envelope> {
    let id = parse_id(&id, "mood id")?;
    let changes = state
        .with_store(move |store| store.delete_mood(&id))
        .await?;
    if changes == 0 {
        return Err(ApiError::not_found(MOOD_NOT_FOUND));
    }
    tracing::info!(mood_id = %id, "mood deleted");

    Ok(Envelope::ok()
        .message("Mood entry deleted successfully")
        .changes(changes))
}
