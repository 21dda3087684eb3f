// AI tutor: a chat proxy that keeps per-session history.

pub mod handlers;
pub mod prompts;
