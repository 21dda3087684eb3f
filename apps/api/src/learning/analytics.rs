use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::learning::LearningPath;

const DEFAULT_TIMELINE: &str = "4 weeks";

#[derive(Debug, Clone, Serialize)]
pub struct PathAnalytics {
    pub overview: Map<String, Value>,
    pub progress: ProgressStats,
    pub time: TimeStats,
    pub phases: Vec<PhaseStat>,
    pub streak: StreakStats,
    pub milestones: Milestones,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressStats {
    pub percentage: i64,
    pub completed_phases: usize,
    pub total_phases: usize,
    pub completed_lessons: usize,
    pub total_lessons: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeStats {
    pub total_hours: f64,
    pub completed_hours: f64,
    pub remaining_hours: f64,
    pub estimated_completion: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PhaseStat {
    pub phase: i64,
    pub title: String,
    pub completed: bool,
    pub duration_minutes: i64,
}

/// Derived from the path's age only; there is no activity log yet.
#[derive(Debug, Clone, Serialize)]
pub struct StreakStats {
    pub current_streak: i64,
    pub total_study_days: i64,
    pub consistency_score: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Milestones {
    pub started: bool,
    #[serde(rename = "25_percent")]
    pub quarter: bool,
    #[serde(rename = "50_percent")]
    pub half: bool,
    #[serde(rename = "75_percent")]
    pub three_quarters: bool,
    pub completed: bool,
}

fn lesson_minutes(lesson: &Value) -> i64 {
    lesson
        .get("duration_minutes")
        .and_then(Value::as_i64)
        .unwrap_or(0)
}

/// Lessons without a numeric `phase` count as phase 1.
fn lesson_phase(lesson: &Value) -> i64 {
    lesson.get("phase").and_then(Value::as_i64).unwrap_or(1)
}

fn hours(minutes: i64) -> f64 {
    (minutes as f64 / 60.0 * 10.0).round() / 10.0
}

pub fn compute_analytics(path: &LearningPath, now: DateTime<Utc>) -> PathAnalytics {
    let total_lessons = path.lessons.len();
    let completed = path.completed_phases.len();
    let progress = path.progress;

    // Durations come from model output; saturate instead of overflowing.
    let total_minutes = path
        .lessons
        .iter()
        .map(lesson_minutes)
        .fold(0i64, i64::saturating_add);
    let completed_minutes = (progress as f64 / 100.0 * total_minutes as f64) as i64;
    let remaining_minutes = total_minutes.saturating_sub(completed_minutes);

    let phases = path
        .lessons
        .iter()
        .map(|lesson| {
            let phase = lesson_phase(lesson);
            PhaseStat {
                phase,
                title: lesson
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                completed: path.completed_phases.contains(&phase),
                duration_minutes: lesson_minutes(lesson),
            }
        })
        .collect();

    let days = (now - path.created_at).num_days().max(0);

    let estimated_completion = if path.meta.timeline.is_empty() {
        DEFAULT_TIMELINE.to_string()
    } else {
        path.meta.timeline.clone()
    };

    PathAnalytics {
        overview: path.meta.overview.clone(),
        progress: ProgressStats {
            percentage: progress,
            completed_phases: completed,
            total_phases: total_lessons,
            completed_lessons: completed,
            total_lessons,
        },
        time: TimeStats {
            total_hours: hours(total_minutes),
            completed_hours: hours(completed_minutes),
            remaining_hours: hours(remaining_minutes),
            estimated_completion,
        },
        phases,
        streak: StreakStats {
            current_streak: days.min(7),
            total_study_days: days,
            consistency_score: ((days as f64 / 30.0 * 100.0) as i64).min(100),
        },
        milestones: Milestones {
            started: true,
            quarter: progress >= 25,
            half: progress >= 50,
            three_quarters: progress >= 75,
            completed: progress >= 100,
        },
    }
}
