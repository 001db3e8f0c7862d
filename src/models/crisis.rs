use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CrisisResource {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: CrisisCategory,
    pub phone: Option<String>,
    pub text_instructions: Option<String>,
    pub website: Option<String>,
    pub priority: i32,
    pub region: String,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq)]
#[sqlx(type_name = "crisis_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CrisisCategory {
    Hotline,
    TextLine,
    Website,
    Emergency,
    SupportGroup,
}

#[derive(Debug, Deserialize)]
pub struct CrisisQuery {
    pub category: Option<CrisisCategory>,
    pub region: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CrisisSearchQuery {
    pub q: String,
    pub region: Option<String>,
}

/// POST /api/crisis (admin)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateResourceRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be under 2000 characters"))]
    pub description: Option<String>,

    pub category: CrisisCategory,
    pub phone: Option<String>,
    pub text_instructions: Option<String>,

    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<String>,

    #[validate(range(min = 0, max = 10, message = "Priority must be 0-10"))]
    pub priority: Option<i32>,

    pub region: Option<String>,
    pub is_verified: Option<bool>,
}

/// PUT /api/crisis/{id} (admin) — partial update
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateResourceRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be under 2000 characters"))]
    pub description: Option<String>,

    pub category: Option<CrisisCategory>,
    pub phone: Option<String>,
    pub text_instructions: Option<String>,

    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<String>,

    #[validate(range(min = 0, max = 10, message = "Priority must be 0-10"))]
    pub priority: Option<i32>,

    pub region: Option<String>,
    pub is_verified: Option<bool>,
    pub is_active: Option<bool>,
}

/// POST /api/crisis/log — anonymous usage telemetry
#[derive(Debug, Deserialize, Validate)]
pub struct AccessLogRequest {
    pub resource_id: Option<Uuid>,

    /// e.g. "viewed", "called", "texted", "visited_website"
    #[validate(length(min = 1, max = 50, message = "Action must be 1-50 characters"))]
    pub action: String,
}
