use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: GoalCategory,
    pub priority: GoalPriority,
    pub status: GoalStatus,
    pub progress: i32,
    pub target_date: Option<NaiveDate>,
    pub completed_at: Option<DateTime<Utc>>,
    pub milestones: Json<Vec<Milestone>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Milestone {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "goal_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Paused,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "goal_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    Low,
    Medium,
    High,
}

impl Default for GoalPriority {
    fn default() -> Self {
        Self::Medium
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "goal_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    MentalHealth,
    PhysicalHealth,
    Relationships,
    Career,
    PersonalGrowth,
    Other,
}

impl Default for GoalCategory {
    fn default() -> Self {
        Self::Other
    }
}

/// POST /api/goals
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGoalRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be under 2000 characters"))]
    pub description: Option<String>,

    pub category: Option<GoalCategory>,
    pub priority: Option<GoalPriority>,
    pub target_date: Option<NaiveDate>,

    /// Milestone titles; ids are assigned server-side.
    pub milestones: Option<Vec<String>>,
}

/// PUT /api/goals/{id} — partial update; status changes go through the
/// transition rules, progress is a direct overwrite.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGoalRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be under 2000 characters"))]
    pub description: Option<String>,

    pub category: Option<GoalCategory>,
    pub priority: Option<GoalPriority>,
    pub target_date: Option<NaiveDate>,

    #[validate(range(min = 0, max = 100, message = "Progress must be 0-100"))]
    pub progress: Option<i32>,

    pub status: Option<GoalStatus>,
}

/// PATCH /api/goals/{id}/milestones/{mid}
#[derive(Debug, Deserialize)]
pub struct ToggleMilestoneRequest {
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct GoalStats {
    pub total: i64,
    pub active: i64,
    pub completed: i64,
    pub paused: i64,
    pub cancelled: i64,
    /// Mean progress over active goals.
    pub average_progress: f64,
}
