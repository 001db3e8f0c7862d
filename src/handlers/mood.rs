use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::mood::{MoodEntry, MoodQuery, MoodStats, MoodStatsQuery, UpsertMoodRequest};
use crate::services::stats;
use crate::AppState;

/// One entry per (user, day): the insert is keyed on the unique
/// (user_id, entry_date) index and conflicts update in place, so logging
/// twice on the same day overwrites rather than duplicates.
pub async fn upsert_mood(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpsertMoodRequest>,
) -> AppResult<Json<MoodEntry>> {
    body.validate()?;

    let entry_date = body.date.unwrap_or_else(|| Utc::now().date_naive());
    let tags = body.tags.unwrap_or_default();

    let entry = sqlx::query_as::<_, MoodEntry>(
        r#"
        INSERT INTO mood_entries (id, user_id, entry_date, mood, note, tags)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id, entry_date) DO UPDATE SET
            mood = $4,
            note = $5,
            tags = $6,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(entry_date)
    .bind(body.mood)
    .bind(&body.note)
    .bind(&tags)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(entry))
}

pub async fn list_moods(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<MoodQuery>,
) -> AppResult<Json<Vec<MoodEntry>>> {
    let start = query
        .start_date
        .unwrap_or_else(|| Utc::now().date_naive() - chrono::Duration::days(30));
    let end = query.end_date.unwrap_or_else(|| Utc::now().date_naive());
    let limit = query.limit.unwrap_or(100).clamp(1, 365);

    let entries = sqlx::query_as::<_, MoodEntry>(
        r#"
        SELECT * FROM mood_entries
        WHERE user_id = $1 AND entry_date BETWEEN $2 AND $3
        ORDER BY entry_date DESC
        LIMIT $4
        "#,
    )
    .bind(auth_user.id)
    .bind(start)
    .bind(end)
    .bind(limit)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(entries))
}

pub async fn mood_stats(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<MoodStatsQuery>,
) -> AppResult<Json<MoodStats>> {
    let period = query.period.unwrap_or(30).clamp(1, 365);
    let start = Utc::now().date_naive() - chrono::Duration::days(period);

    // Oldest first so the trend windows line up.
    let moods = sqlx::query_scalar::<_, i16>(
        r#"
        SELECT mood FROM mood_entries
        WHERE user_id = $1 AND entry_date >= $2
        ORDER BY entry_date ASC
        "#,
    )
    .bind(auth_user.id)
    .bind(start)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(MoodStats {
        total_entries: moods.len() as i64,
        average_mood: stats::average(&moods),
        mood_distribution: stats::distribution(&moods),
        trend: stats::mood_trend(&moods).to_string(),
    }))
}
