// Learning paths: LLM-generated roadmaps with a template fallback,
// client-reported progress, derived analytics, and per-phase quizzes.

pub mod analytics;
pub mod handlers;
pub mod prompts;
pub mod quiz;
pub mod roadmap;
