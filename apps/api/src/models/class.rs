use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    #[default]
    Scheduled,
    Live,
    Completed,
}

impl ClassStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassStatus::Scheduled => "scheduled",
            ClassStatus::Live => "live",
            ClassStatus::Completed => "completed",
        }
    }
}

impl FromStr for ClassStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(ClassStatus::Scheduled),
            "live" => Ok(ClassStatus::Live),
            "completed" => Ok(ClassStatus::Completed),
            other => Err(format!("unknown class status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveClass {
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub title: String,
    pub description: String,
    pub scheduled_time: DateTime<Utc>,
    pub duration_minutes: i64,
    /// Set semantics: a student id appears at most once.
    pub students: Vec<Uuid>,
    pub status: ClassStatus,
    pub recording_url: Option<String>,
}
