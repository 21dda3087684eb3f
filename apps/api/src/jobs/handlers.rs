use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::jobs::matching::{match_jobs, ScoredJob};
use crate::jobs::seed::ensure_jobs_seeded;
use crate::models::job::{Job, JobType};
use crate::state::AppState;

fn default_job_type() -> String {
    JobType::Job.as_str().to_string()
}

#[derive(Debug, Deserialize)]
pub struct JobsQuery {
    #[serde(default = "default_job_type")]
    pub job_type: String,
}

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub jobs: Vec<Job>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub jobs: Vec<ScoredJob>,
}

/// GET /api/jobs?job_type=job|internship
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<JobsQuery>,
) -> Result<Json<JobsResponse>, AppError> {
    let job_type: JobType = query.job_type.parse().map_err(AppError::Validation)?;
    ensure_jobs_seeded(state.store.as_ref()).await?;
    let jobs = state.store.list_jobs(Some(job_type)).await?;
    Ok(Json(JobsResponse { jobs }))
}

/// POST /api/jobs/recommend
///
/// Ranks every listing against the skills stored on the caller's profile.
pub async fn handle_recommend(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<RecommendResponse>, AppError> {
    let profile = state
        .store
        .find_user(user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    ensure_jobs_seeded(state.store.as_ref()).await?;
    let jobs = state.store.list_jobs(None).await?;

    Ok(Json(RecommendResponse {
        jobs: match_jobs(&profile.skills, jobs),
    }))
}
