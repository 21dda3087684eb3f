//! Skill matching: ranks jobs by how many of the user's skills they require.
//!
//! Algorithm:
//! 1. score = number of distinct user skills found in `required_skills`
//!    (exact, case-sensitive string equality)
//! 2. drop jobs scoring 0
//! 3. stable sort by score descending, so ties keep listing order
//! 4. keep the top `MAX_MATCHES`

use std::collections::HashSet;

use serde::Serialize;

use crate::models::job::Job;

pub const MAX_MATCHES: usize = 20;

/// A job plus its overlap score, serialized as the job's fields with `match_score` added.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredJob {
    #[serde(flatten)]
    pub job: Job,
    pub match_score: usize,
}

pub fn match_jobs(user_skills: &[String], jobs: Vec<Job>) -> Vec<ScoredJob> {
    let skills: HashSet<&str> = user_skills.iter().map(String::as_str).collect();

    let mut scored: Vec<ScoredJob> = jobs
        .into_iter()
        .filter_map(|job| {
            let match_score = overlap(&skills, &job.required_skills);
            (match_score > 0).then_some(ScoredJob { job, match_score })
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    scored.truncate(MAX_MATCHES);
    scored
}

fn overlap(skills: &HashSet<&str>, required: &[String]) -> usize {
    let required: HashSet<&str> = required.iter().map(String::as_str).collect();
    required.intersection(skills).count()
}
