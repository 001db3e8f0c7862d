use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::crisis::{
    AccessLogRequest, CreateResourceRequest, CrisisQuery, CrisisResource, CrisisSearchQuery,
    UpdateResourceRequest,
};
use crate::AppState;

/// Directory listing. A requested region also matches resources tagged
/// "global"; ordering puts high-priority, verified, recent resources first.
pub async fn list_resources(
    State(state): State<AppState>,
    Query(query): Query<CrisisQuery>,
) -> AppResult<Json<Vec<CrisisResource>>> {
    let region = query.region.unwrap_or_else(|| "global".to_string());

    let resources = if let Some(category) = query.category {
        sqlx::query_as::<_, CrisisResource>(
            r#"
            SELECT * FROM crisis_resources
            WHERE is_active = true AND category = $1 AND (region = $2 OR region = 'global')
            ORDER BY priority DESC, is_verified DESC, created_at DESC
            "#,
        )
        .bind(category)
        .bind(&region)
        .fetch_all(&state.db)
        .await?
    } else {
        sqlx::query_as::<_, CrisisResource>(
            r#"
            SELECT * FROM crisis_resources
            WHERE is_active = true AND (region = $1 OR region = 'global')
            ORDER BY priority DESC, is_verified DESC, created_at DESC
            "#,
        )
        .bind(&region)
        .fetch_all(&state.db)
        .await?
    };

    Ok(Json(resources))
}

/// Fast path for the emergency banner: a handful of the highest-priority
/// verified resources, nothing else.
pub async fn emergency_resources(
    State(state): State<AppState>,
    Query(query): Query<CrisisQuery>,
) -> AppResult<Json<Vec<CrisisResource>>> {
    let region = query.region.unwrap_or_else(|| "global".to_string());

    let resources = sqlx::query_as::<_, CrisisResource>(
        r#"
        SELECT * FROM crisis_resources
        WHERE is_active = true AND is_verified = true AND (region = $1 OR region = 'global')
        ORDER BY priority DESC, created_at DESC
        LIMIT $2
        "#,
    )
    .bind(&region)
    .bind(state.config.crisis_emergency_limit)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(resources))
}

pub async fn search_resources(
    State(state): State<AppState>,
    Query(query): Query<CrisisSearchQuery>,
) -> AppResult<Json<Vec<CrisisResource>>> {
    if query.q.trim().is_empty() {
        return Err(AppError::Validation("Search query must not be empty".into()));
    }
    let region = query.region.unwrap_or_else(|| "global".to_string());
    let pattern = format!("%{}%", query.q.trim());

    let resources = sqlx::query_as::<_, CrisisResource>(
        r#"
        SELECT * FROM crisis_resources
        WHERE is_active = true AND (region = $1 OR region = 'global')
          AND (title ILIKE $2 OR description ILIKE $2)
        ORDER BY priority DESC, is_verified DESC, created_at DESC
        "#,
    )
    .bind(&region)
    .bind(&pattern)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(resources))
}

/// Anonymous usage telemetry. No user linkage, fire-and-forget from the
/// client's perspective.
pub async fn log_access(
    State(state): State<AppState>,
    Json(body): Json<AccessLogRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    body.validate()?;

    sqlx::query("INSERT INTO crisis_access_logs (id, resource_id, action) VALUES ($1, $2, $3)")
        .bind(Uuid::new_v4())
        .bind(body.resource_id)
        .bind(&body.action)
        .execute(&state.db)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "logged": true })),
    ))
}

pub async fn create_resource(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateResourceRequest>,
) -> AppResult<Json<CrisisResource>> {
    require_admin(&state, auth_user.id).await?;
    body.validate()?;

    let resource = sqlx::query_as::<_, CrisisResource>(
        r#"
        INSERT INTO crisis_resources
            (id, title, description, category, phone, text_instructions, website,
             priority, region, is_verified)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&body.title)
    .bind(&body.description)
    .bind(body.category)
    .bind(&body.phone)
    .bind(&body.text_instructions)
    .bind(&body.website)
    .bind(body.priority.unwrap_or(0))
    .bind(body.region.as_deref().unwrap_or("global"))
    .bind(body.is_verified.unwrap_or(false))
    .fetch_one(&state.db)
    .await?;

    Ok(Json(resource))
}

pub async fn update_resource(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(resource_id): Path<Uuid>,
    Json(body): Json<UpdateResourceRequest>,
) -> AppResult<Json<CrisisResource>> {
    require_admin(&state, auth_user.id).await?;
    body.validate()?;

    let resource = sqlx::query_as::<_, CrisisResource>(
        r#"
        UPDATE crisis_resources SET
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            category = COALESCE($4, category),
            phone = COALESCE($5, phone),
            text_instructions = COALESCE($6, text_instructions),
            website = COALESCE($7, website),
            priority = COALESCE($8, priority),
            region = COALESCE($9, region),
            is_verified = COALESCE($10, is_verified),
            is_active = COALESCE($11, is_active),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(resource_id)
    .bind(&body.title)
    .bind(&body.description)
    .bind(body.category)
    .bind(&body.phone)
    .bind(&body.text_instructions)
    .bind(&body.website)
    .bind(body.priority)
    .bind(&body.region)
    .bind(body.is_verified)
    .bind(body.is_active)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Crisis resource not found".into()))?;

    Ok(Json(resource))
}

pub async fn delete_resource(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(resource_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    require_admin(&state, auth_user.id).await?;

    let result = sqlx::query("DELETE FROM crisis_resources WHERE id = $1")
        .bind(resource_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Crisis resource not found".into()));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}

async fn require_admin(state: &AppState, user_id: Uuid) -> AppResult<()> {
    let is_admin = sqlx::query_scalar::<_, bool>("SELECT is_admin FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?
        .unwrap_or(false);

    if is_admin {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
