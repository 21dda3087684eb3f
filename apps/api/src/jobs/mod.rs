// Job board: seeded listings and skill-overlap recommendations.

pub mod handlers;
pub mod matching;
pub mod seed;
