//! Axum route handlers for learning paths and quizzes.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::learning::analytics::{compute_analytics, PathAnalytics};
use crate::learning::quiz::{generate_questions, grade, phase_topics, QuizResult};
use crate::learning::roadmap::{generate_roadmap, RoadmapParams};
use crate::models::learning::{LearningPath, RoadmapMeta};
use crate::models::quiz::Quiz;
use crate::state::AppState;
use crate::store::ProgressUpdate;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

fn default_skill_level() -> String {
    "beginner".to_string()
}
fn default_final_goal() -> String {
    "Master the fundamentals".to_string()
}
fn default_daily_time() -> String {
    "1 hour".to_string()
}
fn default_timeline() -> String {
    "4 weeks".to_string()
}
fn default_roadmap_type() -> String {
    "detailed".to_string()
}

#[derive(Debug, Deserialize)]
pub struct CreatePathRequest {
    pub subject: String,
    #[serde(default = "default_skill_level")]
    pub skill_level: String,
    #[serde(default = "default_final_goal")]
    pub final_goal: String,
    #[serde(default = "default_daily_time")]
    pub daily_time: String,
    #[serde(default = "default_timeline")]
    pub timeline: String,
    #[serde(default = "default_roadmap_type")]
    pub roadmap_type: String,
}

#[derive(Debug, Serialize)]
pub struct PathsResponse {
    pub paths: Vec<LearningPath>,
}

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub completed_phases: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    pub answers: Vec<Option<String>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/learning/create-path
///
/// Generates a roadmap (LLM or template fallback) and stores it as a new path.
pub async fn handle_create_path(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreatePathRequest>,
) -> Result<Json<LearningPath>, AppError> {
    let subject = req.subject.trim();
    if subject.is_empty() {
        return Err(AppError::Validation("subject cannot be empty".to_string()));
    }

    let params = RoadmapParams {
        subject: subject.to_string(),
        skill_level: req.skill_level,
        final_goal: req.final_goal,
        daily_time: req.daily_time,
        timeline: req.timeline,
        advanced: req.roadmap_type == "advanced",
    };
    let roadmap = generate_roadmap(state.llm.as_ref(), &params).await;

    let path = LearningPath::new(
        user.user_id,
        params.subject,
        roadmap.lessons,
        RoadmapMeta {
            overview: roadmap.overview,
            final_checklist: roadmap.final_checklist,
            next_steps: roadmap.next_steps,
            skill_level: params.skill_level,
            final_goal: params.final_goal,
            daily_time: params.daily_time,
            timeline: params.timeline,
        },
    );
    state.store.insert_path(&path).await?;
    info!(path_id = %path.id, lessons = path.lessons.len(), "Created learning path");

    Ok(Json(path))
}

/// GET /api/learning/my-paths
pub async fn handle_my_paths(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<PathsResponse>, AppError> {
    let paths = state.store.list_paths(user.user_id).await?;
    Ok(Json(PathsResponse { paths }))
}

/// PUT /api/learning/progress/:path_id
///
/// Progress is stored exactly as reported, including values above 100.
pub async fn handle_update_progress(
    State(state): State<AppState>,
    user: AuthUser,
    Path(path_id): Path<Uuid>,
    Json(req): Json<ProgressRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let update = ProgressUpdate {
        progress: req.progress,
        completed_phases: Some(req.completed_phases),
        at: Utc::now(),
    };
    if !state
        .store
        .update_progress(path_id, user.user_id, update)
        .await?
    {
        return Err(AppError::NotFound("Learning path not found".to_string()));
    }
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/learning/analytics/:path_id
pub async fn handle_path_analytics(
    State(state): State<AppState>,
    user: AuthUser,
    Path(path_id): Path<Uuid>,
) -> Result<Json<PathAnalytics>, AppError> {
    let path = find_own_path(&state, path_id, user.user_id).await?;
    Ok(Json(compute_analytics(&path, Utc::now())))
}

/// POST /api/learning/generate-quiz/:path_id/:phase
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    user: AuthUser,
    Path((path_id, phase)): Path<(Uuid, i64)>,
) -> Result<Json<Quiz>, AppError> {
    let path = find_own_path(&state, path_id, user.user_id).await?;

    let lesson = path
        .lessons
        .iter()
        .find(|l| l.get("phase").and_then(Value::as_i64) == Some(phase));
    let title = lesson
        .and_then(|l| l.get("title"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Phase {phase}"));
    let topics = phase_topics(lesson);

    let questions = generate_questions(state.llm.as_ref(), &path.subject, &title, &topics).await;

    let quiz = Quiz {
        id: Uuid::new_v4(),
        path_id,
        phase,
        title,
        subject: path.subject,
        questions,
        created_by: user.user_id,
        created_at: Utc::now(),
    };
    state.store.insert_quiz(&quiz).await?;

    Ok(Json(quiz))
}

/// POST /api/learning/submit-quiz/:quiz_id
pub async fn handle_submit_quiz(
    State(state): State<AppState>,
    user: AuthUser,
    Path(quiz_id): Path<Uuid>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<Json<QuizResult>, AppError> {
    let quiz = state
        .store
        .find_quiz(quiz_id)
        .await?
        .filter(|q| q.created_by == user.user_id)
        .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;

    Ok(Json(grade(&quiz, &req.answers)))
}

async fn find_own_path(
    state: &AppState,
    path_id: Uuid,
    user_id: Uuid,
) -> Result<LearningPath, AppError> {
    state
        .store
        .find_path(path_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Learning path not found".to_string()))
}
