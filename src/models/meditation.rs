use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MeditationSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: MeditationKind,
    pub duration_minutes: i32,
    pub completed_minutes: i32,
    pub completed: bool,
    pub mood_before: Option<i16>,
    pub mood_after: Option<i16>,
    pub session_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "meditation_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MeditationKind {
    Timer,
    Guided,
    Breathing,
}

/// POST /api/meditation — session start
#[derive(Debug, Deserialize, Validate)]
pub struct StartSessionRequest {
    pub kind: MeditationKind,

    #[validate(range(min = 1, max = 240, message = "Duration must be 1-240 minutes"))]
    pub duration_minutes: i32,

    #[validate(range(min = 1, max = 5, message = "Mood must be 1-5"))]
    pub mood_before: Option<i16>,

    /// Default: today.
    pub session_date: Option<NaiveDate>,
}

/// PATCH /api/meditation/{id}/complete — follow-up when the timer elapses
/// or the user finishes early.
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteSessionRequest {
    #[validate(range(min = 0, message = "Completed minutes must be non-negative"))]
    pub completed_minutes: i32,

    #[validate(range(min = 1, max = 5, message = "Mood must be 1-5"))]
    pub mood_after: Option<i16>,
}

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct MeditationStats {
    pub total_sessions: i64,
    pub completed_sessions: i64,
    pub total_minutes: i64,
    /// Mean of (mood_after - mood_before) over sessions with both recorded.
    pub average_mood_delta: Option<f64>,
}
