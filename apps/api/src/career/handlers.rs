use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::career::fallback::fallback_careers;
use crate::career::prompts::{build_career_prompt, counselor_system};
use crate::errors::AppError;
use crate::llm_client::extract::{extract_array, generate_or_fallback};
use crate::models::career::CareerProfile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub careers: Vec<Value>,
}

/// POST /api/career/analyze
///
/// Always answers with a career list; every call is kept as a new profile.
pub async fn handle_analyze(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let careers = generate_or_fallback(
        state.llm.as_ref(),
        &build_career_prompt(&req.interests, &req.skills),
        &counselor_system(),
        "careers",
        |raw| extract_array(raw, "careers"),
        || fallback_careers(&req.interests, &req.skills),
    )
    .await;

    let profile = CareerProfile {
        id: Uuid::new_v4(),
        user_id: user.user_id,
        interests: req.interests,
        skills: req.skills,
        recommended_careers: careers,
        created_at: Utc::now(),
    };
    state.store.insert_career_profile(&profile).await?;
    info!(profile_id = %profile.id, careers = profile.recommended_careers.len(), "Stored career profile");

    Ok(Json(AnalyzeResponse {
        careers: profile.recommended_careers,
    }))
}
