use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::meditation::{
    CompleteSessionRequest, MeditationSession, MeditationStats, SessionQuery, StartSessionRequest,
};
use crate::AppState;

/// A session row is created at start; completion arrives as a follow-up
/// patch when the timer elapses or the user finishes early.
pub async fn start_session(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<StartSessionRequest>,
) -> AppResult<Json<MeditationSession>> {
    body.validate()?;

    let session_date = body.session_date.unwrap_or_else(|| Utc::now().date_naive());

    let session = sqlx::query_as::<_, MeditationSession>(
        r#"
        INSERT INTO meditation_sessions (id, user_id, kind, duration_minutes, mood_before, session_date)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(body.kind)
    .bind(body.duration_minutes)
    .bind(body.mood_before)
    .bind(session_date)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(session))
}

pub async fn complete_session(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
    Json(body): Json<CompleteSessionRequest>,
) -> AppResult<Json<MeditationSession>> {
    body.validate()?;

    let session = sqlx::query_as::<_, MeditationSession>(
        r#"
        UPDATE meditation_sessions SET
            completed_minutes = LEAST($3, duration_minutes),
            completed = true,
            mood_after = COALESCE($4, mood_after)
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(session_id)
    .bind(auth_user.id)
    .bind(body.completed_minutes)
    .bind(body.mood_after)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Meditation session not found".into()))?;

    Ok(Json(session))
}

pub async fn list_sessions(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<SessionQuery>,
) -> AppResult<Json<Vec<MeditationSession>>> {
    let start = query
        .start_date
        .unwrap_or_else(|| Utc::now().date_naive() - chrono::Duration::days(30));
    let end = query.end_date.unwrap_or_else(|| Utc::now().date_naive());
    let limit = query.limit.unwrap_or(100).clamp(1, 365);

    let sessions = sqlx::query_as::<_, MeditationSession>(
        r#"
        SELECT * FROM meditation_sessions
        WHERE user_id = $1 AND session_date BETWEEN $2 AND $3
        ORDER BY session_date DESC, created_at DESC
        LIMIT $4
        "#,
    )
    .bind(auth_user.id)
    .bind(start)
    .bind(end)
    .bind(limit)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(sessions))
}

pub async fn meditation_stats(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<MeditationStats>> {
    let sessions = sqlx::query_as::<_, MeditationSession>(
        "SELECT * FROM meditation_sessions WHERE user_id = $1",
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    let completed: Vec<&MeditationSession> =
        sessions.iter().filter(|s| s.completed).collect();
    let total_minutes: i64 = completed.iter().map(|s| s.completed_minutes as i64).sum();

    let deltas: Vec<f64> = sessions
        .iter()
        .filter_map(|s| match (s.mood_before, s.mood_after) {
            (Some(before), Some(after)) => Some((after - before) as f64),
            _ => None,
        })
        .collect();
    let average_mood_delta = if deltas.is_empty() {
        None
    } else {
        Some(deltas.iter().sum::<f64>() / deltas.len() as f64)
    };

    Ok(Json(MeditationStats {
        total_sessions: sessions.len() as i64,
        completed_sessions: completed.len() as i64,
        total_minutes,
        average_mood_delta,
    }))
}
