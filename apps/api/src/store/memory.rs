use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::career::CareerProfile;
use crate::models::chat::ChatMessage;
use crate::models::class::LiveClass;
use crate::models::job::{Job, JobType};
use crate::models::learning::LearningPath;
use crate::models::quiz::Quiz;
use crate::models::user::{Role, User};
use crate::store::{ProgressUpdate, Store, LIST_LIMIT};

/// In-process `Store` for handler tests. Vectors keep insertion order.
#[derive(Default)]
pub struct MemoryStore {
    pub users: Mutex<Vec<User>>,
    pub messages: Mutex<Vec<ChatMessage>>,
    pub paths: Mutex<Vec<LearningPath>>,
    pub careers: Mutex<Vec<CareerProfile>>,
    pub jobs: Mutex<Vec<Job>>,
    pub classes: Mutex<Vec<LiveClass>>,
    pub quizzes: Mutex<Vec<Quiz>>,
}

const LIMIT: usize = LIST_LIMIT as usize;

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.role == role)
            .take(LIMIT)
            .cloned()
            .collect())
    }

    async fn insert_message(&self, message: &ChatMessage) -> Result<(), AppError> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn recent_messages(
        &self,
        user_id: Uuid,
        session_id: &str,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, AppError> {
        let messages = self.session_messages(user_id, session_id);
        let skip = messages.len().saturating_sub(limit.max(0) as usize);
        Ok(messages.into_iter().skip(skip).collect())
    }

    async fn session_history(
        &self,
        user_id: Uuid,
        session_id: &str,
    ) -> Result<Vec<ChatMessage>, AppError> {
        Ok(self
            .session_messages(user_id, session_id)
            .into_iter()
            .take(LIMIT)
            .collect())
    }

    async fn insert_path(&self, path: &LearningPath) -> Result<(), AppError> {
        self.paths.lock().unwrap().push(path.clone());
        Ok(())
    }

    async fn list_paths(&self, user_id: Uuid) -> Result<Vec<LearningPath>, AppError> {
        Ok(self
            .paths
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .take(LIMIT)
            .cloned()
            .collect())
    }

    async fn find_path(&self, id: Uuid, user_id: Uuid) -> Result<Option<LearningPath>, AppError> {
        Ok(self
            .paths
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id && p.user_id == user_id)
            .cloned())
    }

    async fn update_progress(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: ProgressUpdate,
    ) -> Result<bool, AppError> {
        let mut paths = self.paths.lock().unwrap();
        let Some(path) = paths
            .iter_mut()
            .find(|p| p.id == id && p.user_id == user_id)
        else {
            return Ok(false);
        };
        path.progress = update.progress;
        if let Some(phases) = update.completed_phases {
            path.completed_phases = phases;
        }
        path.last_updated = Some(update.at);
        Ok(true)
    }

    async fn insert_career_profile(&self, profile: &CareerProfile) -> Result<(), AppError> {
        self.careers.lock().unwrap().push(profile.clone());
        Ok(())
    }

    async fn count_jobs(&self) -> Result<i64, AppError> {
        Ok(self.jobs.lock().unwrap().len() as i64)
    }

    async fn insert_jobs(&self, jobs: &[Job]) -> Result<(), AppError> {
        self.jobs.lock().unwrap().extend_from_slice(jobs);
        Ok(())
    }

    async fn list_jobs(&self, job_type: Option<JobType>) -> Result<Vec<Job>, AppError> {
        Ok(self
            .jobs
            .lock()
            .unwrap()
            .iter()
            .filter(|j| job_type.map_or(true, |t| j.job_type == t))
            .take(LIMIT)
            .cloned()
            .collect())
    }

    async fn insert_class(&self, class: &LiveClass) -> Result<(), AppError> {
        self.classes.lock().unwrap().push(class.clone());
        Ok(())
    }

    async fn list_classes(&self) -> Result<Vec<LiveClass>, AppError> {
        let mut classes = self.classes.lock().unwrap().clone();
        classes.sort_by_key(|c| c.scheduled_time);
        classes.truncate(LIMIT);
        Ok(classes)
    }

    async fn add_student(&self, class_id: Uuid, student_id: Uuid) -> Result<bool, AppError> {
        let mut classes = self.classes.lock().unwrap();
        let Some(class) = classes.iter_mut().find(|c| c.id == class_id) else {
            return Ok(false);
        };
        if !class.students.contains(&student_id) {
            class.students.push(student_id);
        }
        Ok(true)
    }

    async fn insert_quiz(&self, quiz: &Quiz) -> Result<(), AppError> {
        self.quizzes.lock().unwrap().push(quiz.clone());
        Ok(())
    }

    async fn find_quiz(&self, id: Uuid) -> Result<Option<Quiz>, AppError> {
        Ok(self
            .quizzes
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id == id)
            .cloned())
    }
}

impl MemoryStore {
    fn session_messages(&self, user_id: Uuid, session_id: &str) -> Vec<ChatMessage> {
        let mut messages: Vec<ChatMessage> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id && m.session_id == session_id)
            .cloned()
            .collect();
        messages.sort_by_key(|m| m.timestamp);
        messages
    }
}
