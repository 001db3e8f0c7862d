use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entry_date: NaiveDate,
    pub mood: i16,
    pub note: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// POST /api/mood — upserts the entry for the given day
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertMoodRequest {
    /// Date for this mood log. Default: today.
    pub date: Option<NaiveDate>,

    /// Mood score 1-5 (1=very bad, 5=very good)
    #[validate(range(min = 1, max = 5, message = "Mood must be 1-5"))]
    pub mood: i16,

    #[validate(length(max = 500, message = "Note must be under 500 characters"))]
    pub note: Option<String>,

    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct MoodQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct MoodStatsQuery {
    /// Window length in days. Default: 30.
    pub period: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct MoodStats {
    pub total_entries: i64,
    pub average_mood: f64,
    /// Count per mood value, indexed "1" through "5".
    pub mood_distribution: std::collections::BTreeMap<String, i64>,
    /// "improving" | "declining" | "stable"
    pub trend: String,
}
