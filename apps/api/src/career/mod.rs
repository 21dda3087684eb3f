// Career analysis: LLM recommendations with a keyword-bucket fallback.

pub mod fallback;
pub mod handlers;
pub mod prompts;
