use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Pass-through metadata kept alongside a generated roadmap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapMeta {
    pub overview: Map<String, Value>,
    pub final_checklist: Vec<Value>,
    pub next_steps: Vec<Value>,
    pub skill_level: String,
    pub final_goal: String,
    pub daily_time: String,
    pub timeline: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningPath {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject: String,
    /// Opaque phase records; only `phase`, `title` and `duration_minutes` are ever read.
    pub lessons: Vec<Value>,
    /// Client-reported and stored as given, including values outside 0..=100.
    pub progress: i64,
    #[serde(default)]
    pub completed_phases: Vec<i64>,
    #[serde(flatten)]
    pub meta: RoadmapMeta,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl LearningPath {
    pub fn new(user_id: Uuid, subject: String, lessons: Vec<Value>, meta: RoadmapMeta) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            subject,
            lessons,
            progress: 0,
            completed_phases: Vec::new(),
            meta,
            last_updated: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_is_flattened_into_path_document() {
        let meta = RoadmapMeta {
            timeline: "4 weeks".into(),
            skill_level: "beginner".into(),
            ..Default::default()
        };
        let path = LearningPath::new(Uuid::new_v4(), "Python".into(), vec![json!({})], meta);
        let doc = serde_json::to_value(&path).unwrap();
        assert_eq!(doc["timeline"], "4 weeks");
        assert_eq!(doc["skill_level"], "beginner");
        assert_eq!(doc["progress"], 0);
        assert!(doc.get("meta").is_none());
    }

    #[test]
    fn test_missing_fields_read_with_defaults() {
        let doc = json!({
            "id": Uuid::new_v4(),
            "user_id": Uuid::new_v4(),
            "subject": "SQL",
            "lessons": [],
            "progress": 10,
            "created_at": "2025-01-01T00:00:00Z"
        });
        let path: LearningPath = serde_json::from_value(doc).unwrap();
        assert!(path.completed_phases.is_empty());
        assert!(path.meta.overview.is_empty());
        assert_eq!(path.last_updated, None);
    }
}
