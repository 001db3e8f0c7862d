use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub is_private: bool,
    pub tags: Vec<String>,
    pub mood: Option<i16>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// POST /api/journal
#[derive(Debug, Deserialize, Validate)]
pub struct CreateJournalRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "Content must be 1-10000 characters"))]
    pub content: String,

    pub is_private: Option<bool>,
    pub tags: Option<Vec<String>>,

    #[validate(range(min = 1, max = 5, message = "Mood must be 1-5"))]
    pub mood: Option<i16>,
}

/// PUT /api/journal/{id} — partial update, all fields optional
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateJournalRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 10000, message = "Content must be 1-10000 characters"))]
    pub content: Option<String>,

    pub is_private: Option<bool>,
    pub tags: Option<Vec<String>>,

    #[validate(range(min = 1, max = 5, message = "Mood must be 1-5"))]
    pub mood: Option<i16>,
}

#[derive(Debug, Deserialize)]
pub struct JournalQuery {
    pub tag: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct JournalStats {
    pub total_entries: i64,
    pub entries_last_30_days: i64,
    /// Distribution over entries that carry a mood, indexed "1" through "5".
    pub mood_distribution: std::collections::BTreeMap<String, i64>,
}
