use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::{AuthUser, TeacherUser};
use crate::errors::AppError;
use crate::models::class::{ClassStatus, LiveClass};
use crate::state::AppState;

fn default_duration() -> i64 {
    60
}

#[derive(Debug, Deserialize)]
pub struct CreateClassRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// RFC 3339, or a naive ISO 8601 timestamp taken as UTC.
    pub scheduled_time: String,
    #[serde(default = "default_duration")]
    pub duration_minutes: i64,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub classes: Vec<LiveClass>,
}

#[derive(Debug, Serialize)]
pub struct JoinResponse {
    pub success: bool,
    pub class_id: Uuid,
}

fn parse_scheduled_time(raw: &str) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(|_| AppError::Validation(format!("scheduled_time '{raw}' is not an ISO 8601 timestamp")))
}

/// POST /api/classes/create (teachers only)
pub async fn handle_create_class(
    State(state): State<AppState>,
    TeacherUser(teacher): TeacherUser,
    Json(req): Json<CreateClassRequest>,
) -> Result<Json<LiveClass>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if req.duration_minutes <= 0 {
        return Err(AppError::Validation(
            "duration_minutes must be positive".to_string(),
        ));
    }

    let class = LiveClass {
        id: Uuid::new_v4(),
        teacher_id: teacher.user_id,
        title: req.title,
        description: req.description,
        scheduled_time: parse_scheduled_time(&req.scheduled_time)?,
        duration_minutes: req.duration_minutes,
        students: Vec::new(),
        status: ClassStatus::Scheduled,
        recording_url: None,
    };
    state.store.insert_class(&class).await?;
    info!(class_id = %class.id, scheduled_time = %class.scheduled_time, "Created live class");

    Ok(Json(class))
}

/// GET /api/classes/schedule
pub async fn handle_schedule(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<ScheduleResponse>, AppError> {
    let classes = state.store.list_classes().await?;
    Ok(Json(ScheduleResponse { classes }))
}

/// POST /api/classes/:class_id/join
///
/// Joining twice leaves a single entry for the caller.
pub async fn handle_join(
    State(state): State<AppState>,
    user: AuthUser,
    Path(class_id): Path<Uuid>,
) -> Result<Json<JoinResponse>, AppError> {
    if !state.store.add_student(class_id, user.user_id).await? {
        return Err(AppError::NotFound("Class not found".to_string()));
    }
    Ok(Json(JoinResponse {
        success: true,
        class_id,
    }))
}
