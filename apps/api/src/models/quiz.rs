use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A multiple-choice question; `correct_answer` is one of "A".."D".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: Uuid,
    pub path_id: Uuid,
    pub phase: i64,
    pub title: String,
    pub subject: String,
    pub questions: Vec<QuizQuestion>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}
