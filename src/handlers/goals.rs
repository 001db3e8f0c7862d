use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;
use sqlx::types::Json as SqlJson;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::goal::{
    CreateGoalRequest, Goal, GoalStats, GoalStatus, Milestone, ToggleMilestoneRequest,
    UpdateGoalRequest,
};
use crate::services::goal_status;
use crate::AppState;

pub async fn list_goals(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<Goal>>> {
    let goals = sqlx::query_as::<_, Goal>(
        r#"
        SELECT * FROM goals
        WHERE user_id = $1
        ORDER BY status ASC, priority DESC, created_at ASC
        "#,
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(goals))
}

pub async fn get_goal(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(goal_id): Path<Uuid>,
) -> AppResult<Json<Goal>> {
    let goal = fetch_owned_goal(&state, goal_id, auth_user.id).await?;
    Ok(Json(goal))
}

pub async fn create_goal(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateGoalRequest>,
) -> AppResult<Json<Goal>> {
    body.validate()?;

    let milestones: Vec<Milestone> = body
        .milestones
        .unwrap_or_default()
        .into_iter()
        .map(|title| Milestone {
            id: Uuid::new_v4(),
            title,
            completed: false,
        })
        .collect();

    let goal = sqlx::query_as::<_, Goal>(
        r#"
        INSERT INTO goals (id, user_id, title, description, category, priority, target_date, milestones)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(&body.title)
    .bind(&body.description)
    .bind(body.category.unwrap_or_default())
    .bind(body.priority.unwrap_or_default())
    .bind(body.target_date)
    .bind(SqlJson(milestones))
    .fetch_one(&state.db)
    .await?;

    Ok(Json(goal))
}

/// Partial update. Progress is a direct overwrite and never changes status;
/// status changes go through the transition rules. A status equal to the
/// current one is a no-op rather than an error, so clients may resubmit the
/// full object.
pub async fn update_goal(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(goal_id): Path<Uuid>,
    Json(body): Json<UpdateGoalRequest>,
) -> AppResult<Json<Goal>> {
    body.validate()?;

    let goal = fetch_owned_goal(&state, goal_id, auth_user.id).await?;

    let mut new_status = goal.status;
    let mut completed_at = goal.completed_at;

    if let Some(requested) = body.status {
        if requested != goal.status {
            goal_status::check_transition(goal.status, requested)?;
            new_status = requested;
            completed_at = match requested {
                GoalStatus::Completed => Some(Utc::now()),
                // Reopening clears the completion timestamp.
                _ => None,
            };
        }
    }

    let goal = sqlx::query_as::<_, Goal>(
        r#"
        UPDATE goals SET
            title = COALESCE($3, title),
            description = COALESCE($4, description),
            category = COALESCE($5, category),
            priority = COALESCE($6, priority),
            target_date = COALESCE($7, target_date),
            progress = COALESCE($8, progress),
            status = $9,
            completed_at = $10,
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(goal_id)
    .bind(auth_user.id)
    .bind(&body.title)
    .bind(&body.description)
    .bind(body.category)
    .bind(body.priority)
    .bind(body.target_date)
    .bind(body.progress)
    .bind(new_status)
    .bind(completed_at)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(goal))
}

/// Flip one milestone's completed flag. Progress is not recomputed —
/// progress and milestones are independent fields.
pub async fn toggle_milestone(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path((goal_id, milestone_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<ToggleMilestoneRequest>,
) -> AppResult<Json<Goal>> {
    let goal = fetch_owned_goal(&state, goal_id, auth_user.id).await?;

    let mut milestones = goal.milestones.0;
    let milestone = milestones
        .iter_mut()
        .find(|m| m.id == milestone_id)
        .ok_or(AppError::NotFound("Milestone not found".into()))?;
    milestone.completed = body.completed;

    let goal = sqlx::query_as::<_, Goal>(
        r#"
        UPDATE goals SET milestones = $3, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(goal_id)
    .bind(auth_user.id)
    .bind(SqlJson(milestones))
    .fetch_one(&state.db)
    .await?;

    Ok(Json(goal))
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(goal_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let result = sqlx::query("DELETE FROM goals WHERE id = $1 AND user_id = $2")
        .bind(goal_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Goal not found".into()));
    }

    Ok(Json(serde_json::json!({ "deleted": true })))
}

pub async fn goal_stats(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<GoalStats>> {
    let goals = sqlx::query_as::<_, Goal>("SELECT * FROM goals WHERE user_id = $1")
        .bind(auth_user.id)
        .fetch_all(&state.db)
        .await?;

    let count_by = |status: GoalStatus| goals.iter().filter(|g| g.status == status).count() as i64;

    let active_progress: Vec<i32> = goals
        .iter()
        .filter(|g| g.status == GoalStatus::Active)
        .map(|g| g.progress)
        .collect();
    let average_progress = if active_progress.is_empty() {
        0.0
    } else {
        active_progress.iter().map(|p| *p as f64).sum::<f64>() / active_progress.len() as f64
    };

    Ok(Json(GoalStats {
        total: goals.len() as i64,
        active: count_by(GoalStatus::Active),
        completed: count_by(GoalStatus::Completed),
        paused: count_by(GoalStatus::Paused),
        cancelled: count_by(GoalStatus::Cancelled),
        average_progress,
    }))
}

async fn fetch_owned_goal(state: &AppState, goal_id: Uuid, user_id: Uuid) -> AppResult<Goal> {
    sqlx::query_as::<_, Goal>("SELECT * FROM goals WHERE id = $1 AND user_id = $2")
        .bind(goal_id)
        .bind(user_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::NotFound("Goal not found".into()))
}
