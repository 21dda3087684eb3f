use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::TeacherUser;
use crate::errors::AppError;
use crate::models::learning::LearningPath;
use crate::models::user::{Role, User};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StudentsResponse {
    pub students: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct StudentAnalytics {
    pub student_id: Uuid,
    pub learning_paths: usize,
    pub total_lessons: usize,
    pub average_progress: f64,
    pub paths: Vec<LearningPath>,
}

impl StudentAnalytics {
    /// An unknown student or one without paths yields zeros, not an error.
    pub fn from_paths(student_id: Uuid, paths: Vec<LearningPath>) -> Self {
        let total_lessons = paths.iter().map(|p| p.lessons.len()).sum();
        let average_progress = if paths.is_empty() {
            0.0
        } else {
            paths.iter().map(|p| p.progress as f64).sum::<f64>() / paths.len() as f64
        };
        Self {
            student_id,
            learning_paths: paths.len(),
            total_lessons,
            average_progress,
            paths,
        }
    }
}

/// GET /api/teacher/students (teachers only)
pub async fn handle_students(
    State(state): State<AppState>,
    _teacher: TeacherUser,
) -> Result<Json<StudentsResponse>, AppError> {
    let students = state.store.list_users_by_role(Role::Student).await?;
    Ok(Json(StudentsResponse { students }))
}

/// GET /api/teacher/analytics/:student_id (teachers only)
pub async fn handle_student_analytics(
    State(state): State<AppState>,
    _teacher: TeacherUser,
    Path(student_id): Path<Uuid>,
) -> Result<Json<StudentAnalytics>, AppError> {
    let paths = state.store.list_paths(student_id).await?;
    Ok(Json(StudentAnalytics::from_paths(student_id, paths)))
}
