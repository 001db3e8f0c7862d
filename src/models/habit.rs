use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Habit {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: HabitCategory,
    pub frequency: HabitFrequency,
    pub target_count: i32,
    pub unit: String,
    pub icon: String,
    pub is_active: bool,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_completed_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "habit_frequency", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl Default for HabitFrequency {
    fn default() -> Self {
        Self::Daily
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "habit_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HabitCategory {
    Mindfulness,
    Exercise,
    Nutrition,
    Sleep,
    Social,
    Productivity,
    Other,
}

impl Default for HabitCategory {
    fn default() -> Self {
        Self::Other
    }
}

/// POST /api/habits
#[derive(Debug, Deserialize, Validate)]
pub struct CreateHabitRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must be under 2000 characters"))]
    pub description: Option<String>,

    pub category: Option<HabitCategory>,
    pub frequency: Option<HabitFrequency>,

    /// Completions needed per period to count as done. Default: 1.
    #[validate(range(min = 1, message = "Target count must be at least 1"))]
    pub target_count: Option<i32>,

    #[validate(length(max = 50, message = "Unit must be under 50 characters"))]
    pub unit: Option<String>,

    pub icon: Option<String>,
}

/// PUT /api/habits/{id} — partial update, all fields optional
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateHabitRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 2000, message = "Description must be under 2000 characters"))]
    pub description: Option<String>,

    pub category: Option<HabitCategory>,
    pub frequency: Option<HabitFrequency>,

    #[validate(range(min = 1, message = "Target count must be at least 1"))]
    pub target_count: Option<i32>,

    #[validate(length(max = 50, message = "Unit must be under 50 characters"))]
    pub unit: Option<String>,

    pub icon: Option<String>,

    /// Pause/resume tracking without touching streaks or history.
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HabitEntry {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub user_id: Uuid,
    pub entry_date: NaiveDate,
    pub completed: bool,
    pub count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// POST /api/habits/entries — upserts the entry for (habit, day)
#[derive(Debug, Deserialize, Validate)]
pub struct RecordEntryRequest {
    pub habit_id: Uuid,

    /// Date for this completion. Default: today.
    pub date: Option<NaiveDate>,

    pub completed: bool,

    #[validate(range(min = 0, message = "Count must be non-negative"))]
    pub count: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct HabitEntryQuery {
    pub habit_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct HabitStats {
    pub total_habits: i64,
    pub completed_this_week: i64,
    pub longest_streak: i32,
    pub completion_rate: f64,
}
