use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Snapshot of one career analysis. Profiles accumulate; nothing is deduplicated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub interests: Vec<String>,
    pub skills: Vec<String>,
    /// Opaque career records as produced by the LLM or the fallback table.
    pub recommended_careers: Vec<Value>,
    pub created_at: DateTime<Utc>,
}
