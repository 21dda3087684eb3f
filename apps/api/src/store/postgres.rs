use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::career::CareerProfile;
use crate::models::chat::{ChatMessage, ChatRole};
use crate::models::class::LiveClass;
use crate::models::job::{Job, JobType};
use crate::models::learning::{LearningPath, RoadmapMeta};
use crate::models::quiz::{Quiz, QuizQuestion};
use crate::models::user::{Role, User};
use crate::store::{ProgressUpdate, Store, LIST_LIMIT};

/// `Store` backed by the tables in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn corrupt(what: &str, detail: String) -> AppError {
    AppError::Internal(anyhow::anyhow!("corrupt {what} row: {detail}"))
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    role: String,
    password_hash: String,
    interests: Vec<String>,
    skills: Vec<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            role: row.role.parse::<Role>().map_err(|e| corrupt("user", e))?,
            id: row.id,
            email: row.email,
            name: row.name,
            password_hash: row.password_hash,
            interests: row.interests,
            skills: row.skills,
            created_at: row.created_at,
        })
    }
}

#[derive(FromRow)]
struct MessageRow {
    id: Uuid,
    user_id: Uuid,
    session_id: String,
    role: String,
    content: String,
    timestamp: DateTime<Utc>,
}

impl TryFrom<MessageRow> for ChatMessage {
    type Error = AppError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let role = match row.role.as_str() {
            "user" => ChatRole::User,
            "assistant" => ChatRole::Assistant,
            other => return Err(corrupt("chat message", format!("role '{other}'"))),
        };
        Ok(ChatMessage {
            id: row.id,
            user_id: row.user_id,
            session_id: row.session_id,
            role,
            content: row.content,
            timestamp: row.timestamp,
        })
    }
}

#[derive(FromRow)]
struct PathRow {
    id: Uuid,
    user_id: Uuid,
    subject: String,
    lessons: Json<Vec<Value>>,
    progress: i64,
    completed_phases: Vec<i64>,
    metadata: Json<RoadmapMeta>,
    last_updated: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<PathRow> for LearningPath {
    fn from(row: PathRow) -> Self {
        LearningPath {
            id: row.id,
            user_id: row.user_id,
            subject: row.subject,
            lessons: row.lessons.0,
            progress: row.progress,
            completed_phases: row.completed_phases,
            meta: row.metadata.0,
            last_updated: row.last_updated,
            created_at: row.created_at,
        }
    }
}

#[derive(FromRow)]
struct JobRow {
    id: Uuid,
    title: String,
    company: String,
    location: String,
    job_type: String,
    required_skills: Vec<String>,
    salary: String,
    description: String,
    experience_level: String,
}

impl TryFrom<JobRow> for Job {
    type Error = AppError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        Ok(Job {
            job_type: row.job_type.parse().map_err(|e| corrupt("job", e))?,
            id: row.id,
            title: row.title,
            company: row.company,
            location: row.location,
            required_skills: row.required_skills,
            salary: row.salary,
            description: row.description,
            experience_level: row.experience_level,
        })
    }
}

#[derive(FromRow)]
struct ClassRow {
    id: Uuid,
    teacher_id: Uuid,
    title: String,
    description: String,
    scheduled_time: DateTime<Utc>,
    duration_minutes: i64,
    students: Vec<Uuid>,
    status: String,
    recording_url: Option<String>,
}

impl TryFrom<ClassRow> for LiveClass {
    type Error = AppError;

    fn try_from(row: ClassRow) -> Result<Self, Self::Error> {
        Ok(LiveClass {
            status: row.status.parse().map_err(|e| corrupt("live class", e))?,
            id: row.id,
            teacher_id: row.teacher_id,
            title: row.title,
            description: row.description,
            scheduled_time: row.scheduled_time,
            duration_minutes: row.duration_minutes,
            students: row.students,
            recording_url: row.recording_url,
        })
    }
}

#[derive(FromRow)]
struct QuizRow {
    id: Uuid,
    path_id: Uuid,
    phase: i64,
    title: String,
    subject: String,
    questions: Json<Vec<QuizQuestion>>,
    created_by: Uuid,
    created_at: DateTime<Utc>,
}

impl From<QuizRow> for Quiz {
    fn from(row: QuizRow) -> Self {
        Quiz {
            id: row.id,
            path_id: row.path_id,
            phase: row.phase,
            title: row.title,
            subject: row.subject,
            questions: row.questions.0,
            created_by: row.created_by,
            created_at: row.created_at,
        }
    }
}

const USER_COLUMNS: &str =
    "id, email, name, role, password_hash, interests, skills, created_at";
const PATH_COLUMNS: &str =
    "id, user_id, subject, lessons, progress, completed_phases, metadata, last_updated, created_at";
const JOB_COLUMNS: &str = "id, title, company, location, type AS job_type, required_skills, \
     salary, description, experience_level";
const CLASS_COLUMNS: &str = "id, teacher_id, title, description, scheduled_time, \
     duration_minutes, students, status, recording_url";

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO users
                (id, email, name, role, password_hash, interests, skills, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(&user.password_hash)
        .bind(&user.interests)
        .bind(&user.skills)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                AppError::Conflict("Email already registered".to_string())
            } else {
                AppError::Database(e)
            }
        })?;
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        row.map(User::try_from).transpose()
    }

    async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, AppError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role = $1 ORDER BY created_at LIMIT $2"
        ))
        .bind(role.as_str())
        .bind(LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(User::try_from).collect()
    }

    async fn insert_message(&self, message: &ChatMessage) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO chat_messages (id, user_id, session_id, role, content, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(message.id)
        .bind(message.user_id)
        .bind(&message.session_id)
        .bind(message.role.as_str())
        .bind(&message.content)
        .bind(message.timestamp)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn recent_messages(
        &self,
        user_id: Uuid,
        session_id: &str,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, AppError> {
        let rows: Vec<MessageRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, session_id, role, content, timestamp
            FROM chat_messages
            WHERE user_id = $1 AND session_id = $2
            ORDER BY timestamp DESC
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(session_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        let mut messages = rows
            .into_iter()
            .map(ChatMessage::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        messages.reverse();
        Ok(messages)
    }

    async fn session_history(
        &self,
        user_id: Uuid,
        session_id: &str,
    ) -> Result<Vec<ChatMessage>, AppError> {
        let rows: Vec<MessageRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, session_id, role, content, timestamp
            FROM chat_messages
            WHERE user_id = $1 AND session_id = $2
            ORDER BY timestamp ASC
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(session_id)
        .bind(LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(ChatMessage::try_from).collect()
    }

    async fn insert_path(&self, path: &LearningPath) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO learning_paths
                (id, user_id, subject, lessons, progress, completed_phases,
                 metadata, last_updated, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(path.id)
        .bind(path.user_id)
        .bind(&path.subject)
        .bind(Json(&path.lessons))
        .bind(path.progress)
        .bind(&path.completed_phases)
        .bind(Json(&path.meta))
        .bind(path.last_updated)
        .bind(path.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_paths(&self, user_id: Uuid) -> Result<Vec<LearningPath>, AppError> {
        let rows: Vec<PathRow> = sqlx::query_as(&format!(
            "SELECT {PATH_COLUMNS} FROM learning_paths WHERE user_id = $1 ORDER BY created_at LIMIT $2"
        ))
        .bind(user_id)
        .bind(LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(LearningPath::from).collect())
    }

    async fn find_path(&self, id: Uuid, user_id: Uuid) -> Result<Option<LearningPath>, AppError> {
        let row: Option<PathRow> = sqlx::query_as(&format!(
            "SELECT {PATH_COLUMNS} FROM learning_paths WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(LearningPath::from))
    }

    async fn update_progress(
        &self,
        id: Uuid,
        user_id: Uuid,
        update: ProgressUpdate,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE learning_paths
            SET progress = $1,
                completed_phases = COALESCE($2, completed_phases),
                last_updated = $3
            WHERE id = $4 AND user_id = $5
            "#,
        )
        .bind(update.progress)
        .bind(update.completed_phases)
        .bind(update.at)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_career_profile(&self, profile: &CareerProfile) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO career_profiles
                (id, user_id, interests, skills, recommended_careers, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(&profile.interests)
        .bind(&profile.skills)
        .bind(Json(&profile.recommended_careers))
        .bind(profile.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn count_jobs(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert_jobs(&self, jobs: &[Job]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for job in jobs {
            sqlx::query(
                r#"
                INSERT INTO jobs
                    (id, title, company, location, type, required_skills,
                     salary, description, experience_level)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(job.id)
            .bind(&job.title)
            .bind(&job.company)
            .bind(&job.location)
            .bind(job.job_type.as_str())
            .bind(&job.required_skills)
            .bind(&job.salary)
            .bind(&job.description)
            .bind(&job.experience_level)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn list_jobs(&self, job_type: Option<JobType>) -> Result<Vec<Job>, AppError> {
        let rows: Vec<JobRow> = sqlx::query_as(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE ($1::text IS NULL OR type = $1) ORDER BY seq LIMIT $2"
        ))
        .bind(job_type.map(|t| t.as_str()))
        .bind(LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Job::try_from).collect()
    }

    async fn insert_class(&self, class: &LiveClass) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO live_classes
                (id, teacher_id, title, description, scheduled_time,
                 duration_minutes, students, status, recording_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(class.id)
        .bind(class.teacher_id)
        .bind(&class.title)
        .bind(&class.description)
        .bind(class.scheduled_time)
        .bind(class.duration_minutes)
        .bind(&class.students)
        .bind(class.status.as_str())
        .bind(&class.recording_url)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_classes(&self) -> Result<Vec<LiveClass>, AppError> {
        let rows: Vec<ClassRow> = sqlx::query_as(&format!(
            "SELECT {CLASS_COLUMNS} FROM live_classes ORDER BY scheduled_time ASC LIMIT $1"
        ))
        .bind(LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(LiveClass::try_from).collect()
    }

    async fn add_student(&self, class_id: Uuid, student_id: Uuid) -> Result<bool, AppError> {
        // Single statement, so concurrent joins cannot duplicate an entry.
        let result = sqlx::query(
            r#"
            UPDATE live_classes
            SET students = CASE
                WHEN $2 = ANY(students) THEN students
                ELSE array_append(students, $2)
            END
            WHERE id = $1
            "#,
        )
        .bind(class_id)
        .bind(student_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_quiz(&self, quiz: &Quiz) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO quizzes
                (id, path_id, phase, title, subject, questions, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(quiz.id)
        .bind(quiz.path_id)
        .bind(quiz.phase)
        .bind(&quiz.title)
        .bind(&quiz.subject)
        .bind(Json(&quiz.questions))
        .bind(quiz.created_by)
        .bind(quiz.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_quiz(&self, id: Uuid) -> Result<Option<Quiz>, AppError> {
        let row: Option<QuizRow> = sqlx::query_as(
            r#"
            SELECT id, path_id, phase, title, subject, questions, created_by, created_at
            FROM quizzes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Quiz::from))
    }
}
