//! Persistence seam. Handlers only see `dyn Store`; Postgres backs it in
//! production and an in-memory map backs it in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::career::CareerProfile;
use crate::models::chat::ChatMessage;
use crate::models::class::LiveClass;
use crate::models::job::{Job, JobType};
use crate::models::learning::LearningPath;
use crate::models::quiz::Quiz;
use crate::models::user::{Role, User};

#[cfg(test)]
pub mod memory;
pub mod postgres;

/// Upper bound on rows returned by any listing query.
pub const LIST_LIMIT: i64 = 100;

/// A client-reported progress change for one learning path.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    /// Stored as given; no clamping to 0..=100.
    pub progress: i64,
    /// `None` leaves the stored phases untouched.
    pub completed_phases: Option<Vec<i64>>,
    pub at: DateTime<Utc>,
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Fails with `Conflict` when the email is already taken.
    async fn insert_user(&self, user: &User) -> Result<(), AppError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, AppError>;

    async fn insert_message(&self, message: &ChatMessage) -> Result<(), AppError>;
    /// The newest `limit` turns of a session, returned oldest first.
    async fn recent_messages(
        &self,
        user_id: Uuid,
        session_id: &str,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, AppError>;
    /// The first `LIST_LIMIT` turns of a session, oldest first.
    async fn session_history(
        &self,
        user_id: Uuid,
        session_id: &str,
    ) -> Result<Vec<ChatMessage>, AppError>;

    async fn insert_path(&self, path: &LearningPath) -> Result<(), AppError>;
    async fn list_paths(&self, user_id: Uuid) -> Result<Vec<LearningPath>, AppError>;
    async fn find_path(&self, id: Uuid, user_id: Uuid) -> Result<Option<LearningPath>, AppError>;
    /// Returns false when no path with this id belongs to the user.
    async fn update_progress(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: ProgressUpdate,
    ) -> Result<bool, AppError>;

    async fn insert_career_profile(&self, profile: &CareerProfile) -> Result<(), AppError>;

    async fn count_jobs(&self) -> Result<i64, AppError>;
    async fn insert_jobs(&self, jobs: &[Job]) -> Result<(), AppError>;
    /// Jobs in insertion order, optionally restricted to one type.
    async fn list_jobs(&self, job_type: Option<JobType>) -> Result<Vec<Job>, AppError>;

    async fn insert_class(&self, class: &LiveClass) -> Result<(), AppError>;
    /// Classes ordered by `scheduled_time` ascending.
    async fn list_classes(&self) -> Result<Vec<LiveClass>, AppError>;
    /// Adds the student unless already present. Returns false if the class does not exist.
    async fn add_student(&self, class_id: Uuid, student_id: Uuid) -> Result<bool, AppError>;

    async fn insert_quiz(&self, quiz: &Quiz) -> Result<(), AppError>;
    async fn find_quiz(&self, id: Uuid) -> Result<Option<Quiz>, AppError>;
}
