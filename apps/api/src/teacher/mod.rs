// Teacher dashboard: student roster and per-student progress summaries.

pub mod handlers;
