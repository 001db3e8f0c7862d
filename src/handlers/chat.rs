use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::crisis::CrisisResource;
use crate::services::completion::{self, CompletionMode};
use crate::services::crisis_keywords;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub message: String,

    /// "supportive" (default) or "reflection"
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub is_crisis: bool,
    pub disclaimer: String,
    /// Emergency resources, attached only on crisis-flagged turns.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<CrisisResource>,
    /// "completion" or "fallback"
    pub source: String,
}

/// Supportive chat turn. Crisis-flagged input short-circuits to the crisis
/// disclaimer plus emergency resources without touching the completion
/// service; otherwise the external model answers, with a canned supportive
/// fallback if it is unreachable.
pub async fn chat(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    body.validate()?;

    if crisis_keywords::detect_crisis(&body.message) {
        tracing::info!(user_id = %auth_user.id, "Crisis keywords detected in chat message");

        let resources = sqlx::query_as::<_, CrisisResource>(
            r#"
            SELECT * FROM crisis_resources
            WHERE is_active = true AND is_verified = true
            ORDER BY priority DESC, created_at DESC
            LIMIT $1
            "#,
        )
        .bind(state.config.crisis_emergency_limit)
        .fetch_all(&state.db)
        .await?;

        return Ok(Json(ChatResponse {
            reply: crisis_keywords::CRISIS_DISCLAIMER.to_string(),
            is_crisis: true,
            disclaimer: crisis_keywords::CRISIS_DISCLAIMER.to_string(),
            resources,
            source: "crisis".to_string(),
        }));
    }

    let mode = match body.mode.as_deref() {
        Some("reflection") => CompletionMode::Reflection,
        _ => CompletionMode::Supportive,
    };

    let (reply, source) = match completion::complete(&state.config, &body.message, mode).await {
        Ok(text) => (text, "completion"),
        Err(e) => {
            tracing::warn!(error = %e, "Completion service unavailable, using fallback");
            (completion::fallback_response(&body.message).to_string(), "fallback")
        }
    };

    Ok(Json(ChatResponse {
        reply,
        is_crisis: false,
        disclaimer: crisis_keywords::SUPPORT_DISCLAIMER.to_string(),
        resources: Vec::new(),
        source: source.to_string(),
    }))
}
