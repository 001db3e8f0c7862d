use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{Datelike, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::habit::{
    CreateHabitRequest, Habit, HabitEntry, HabitEntryQuery, HabitStats, RecordEntryRequest,
    UpdateHabitRequest,
};
use crate::services::{stats, streaks};
use crate::AppState;

pub async fn list_habits(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<Habit>>> {
    let habits = sqlx::query_as::<_, Habit>(
        r#"
        SELECT * FROM habits
        WHERE user_id = $1
        ORDER BY is_active DESC, created_at ASC
        "#,
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(habits))
}

pub async fn get_habit(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(habit_id): Path<Uuid>,
) -> AppResult<Json<Habit>> {
    let habit = fetch_owned_habit(&state, habit_id, auth_user.id).await?;
    Ok(Json(habit))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateHabitRequest>,
) -> AppResult<Json<Habit>> {
    body.validate()?;

    let habit = sqlx::query_as::<_, Habit>(
        r#"
        INSERT INTO habits (id, user_id, name, description, category, frequency, target_count, unit, icon)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(&body.name)
    .bind(&body.description)
    .bind(body.category.unwrap_or_default())
    .bind(body.frequency.unwrap_or_default())
    .bind(body.target_count.unwrap_or(1))
    .bind(body.unit.as_deref().unwrap_or("times"))
    .bind(body.icon.as_deref().unwrap_or("circle"))
    .fetch_one(&state.db)
    .await?;

    Ok(Json(habit))
}

pub async fn update_habit(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(habit_id): Path<Uuid>,
    Json(body): Json<UpdateHabitRequest>,
) -> AppResult<Json<Habit>> {
    body.validate()?;

    // Toggling is_active pauses/resumes tracking; streaks and history are untouched.
    let habit = sqlx::query_as::<_, Habit>(
        r#"
        UPDATE habits SET
            name = COALESCE($3, name),
            description = COALESCE($4, description),
            category = COALESCE($5, category),
            frequency = COALESCE($6, frequency),
            target_count = COALESCE($7, target_count),
            unit = COALESCE($8, unit),
            icon = COALESCE($9, icon),
            is_active = COALESCE($10, is_active),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(habit_id)
    .bind(auth_user.id)
    .bind(&body.name)
    .bind(&body.description)
    .bind(body.category)
    .bind(body.frequency)
    .bind(body.target_count)
    .bind(&body.unit)
    .bind(&body.icon)
    .bind(body.is_active)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Habit not found".into()))?;

    Ok(Json(habit))
}

/// Removes the habit and, with it, its completion history (FK cascade).
pub async fn delete_habit(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(habit_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM habits WHERE id = $1 AND user_id = $2")
        .bind(habit_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Habit not found".into()));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Record (or amend) a day's completion and advance the streak.
pub async fn record_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<RecordEntryRequest>,
) -> AppResult<Json<HabitEntry>> {
    body.validate()?;

    let habit = fetch_owned_habit(&state, body.habit_id, auth_user.id).await?;
    let entry_date = body.date.unwrap_or_else(|| Utc::now().date_naive());
    let count = body
        .count
        .unwrap_or(if body.completed { habit.target_count } else { 0 });

    // The streak transition depends on the entry's prior completed flag.
    let was_completed = sqlx::query_scalar::<_, bool>(
        "SELECT completed FROM habit_entries WHERE habit_id = $1 AND entry_date = $2",
    )
    .bind(body.habit_id)
    .bind(entry_date)
    .fetch_optional(&state.db)
    .await?
    .unwrap_or(false);

    let entry = sqlx::query_as::<_, HabitEntry>(
        r#"
        INSERT INTO habit_entries (id, habit_id, user_id, entry_date, completed, count)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (habit_id, entry_date) DO UPDATE SET
            completed = $5,
            count = $6,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(body.habit_id)
    .bind(auth_user.id)
    .bind(entry_date)
    .bind(body.completed)
    .bind(count)
    .fetch_one(&state.db)
    .await?;

    let before = streaks::StreakState {
        current: habit.current_streak,
        longest: habit.longest_streak,
        last_completed_date: habit.last_completed_date,
    };
    let after = streaks::apply_entry(
        before,
        habit.frequency,
        entry_date,
        was_completed,
        body.completed,
    );

    if after != before {
        sqlx::query(
            r#"
            UPDATE habits SET
                current_streak = $2,
                longest_streak = $3,
                last_completed_date = $4,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(habit.id)
        .bind(after.current)
        .bind(after.longest)
        .bind(after.last_completed_date)
        .execute(&state.db)
        .await?;
    }

    Ok(Json(entry))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<HabitEntryQuery>,
) -> AppResult<Json<Vec<HabitEntry>>> {
    let start = query
        .start_date
        .unwrap_or_else(|| Utc::now().date_naive() - chrono::Duration::days(30));
    let end = query.end_date.unwrap_or_else(|| Utc::now().date_naive());

    let entries = if let Some(habit_id) = query.habit_id {
        sqlx::query_as::<_, HabitEntry>(
            r#"
            SELECT * FROM habit_entries
            WHERE user_id = $1 AND habit_id = $2 AND entry_date BETWEEN $3 AND $4
            ORDER BY entry_date DESC
            "#,
        )
        .bind(auth_user.id)
        .bind(habit_id)
        .bind(start)
        .bind(end)
        .fetch_all(&state.db)
        .await?
    } else {
        sqlx::query_as::<_, HabitEntry>(
            r#"
            SELECT * FROM habit_entries
            WHERE user_id = $1 AND entry_date BETWEEN $2 AND $3
            ORDER BY entry_date DESC
            "#,
        )
        .bind(auth_user.id)
        .bind(start)
        .bind(end)
        .fetch_all(&state.db)
        .await?
    };

    Ok(Json(entries))
}

pub async fn habit_stats(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<HabitStats>> {
    let habits = sqlx::query_as::<_, Habit>("SELECT * FROM habits WHERE user_id = $1")
        .bind(auth_user.id)
        .fetch_all(&state.db)
        .await?;

    let today = Utc::now().date_naive();
    let week_start = today - chrono::Duration::days(today.weekday().num_days_from_monday() as i64);

    let completed_this_week = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM habit_entries
        WHERE user_id = $1 AND completed = true AND entry_date >= $2
        "#,
    )
    .bind(auth_user.id)
    .bind(week_start)
    .fetch_one(&state.db)
    .await?;

    // Completion rate over the trailing 30 days, active habits only.
    let window_days = 30i64;
    let window_start = today - chrono::Duration::days(window_days);
    let completed_in_window = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM habit_entries e
        JOIN habits h ON h.id = e.habit_id
        WHERE e.user_id = $1 AND e.completed = true
          AND e.entry_date >= $2 AND h.is_active = true
        "#,
    )
    .bind(auth_user.id)
    .bind(window_start)
    .fetch_one(&state.db)
    .await?;

    let expected: i64 = habits
        .iter()
        .filter(|h| h.is_active)
        .map(|h| streaks::expected_entries(h.frequency, window_days))
        .sum();

    let longest_streak = habits.iter().map(|h| h.longest_streak).max().unwrap_or(0);

    Ok(Json(HabitStats {
        total_habits: habits.len() as i64,
        completed_this_week,
        longest_streak,
        completion_rate: stats::completion_rate(completed_in_window, expected),
    }))
}

async fn fetch_owned_habit(state: &AppState, habit_id: Uuid, user_id: Uuid) -> AppResult<Habit> {
    sqlx::query_as::<_, Habit>("SELECT * FROM habits WHERE id = $1 AND user_id = $2")
        .bind(habit_id)
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::NotFound("Habit not found".into()))
}
