// Live classes: teacher-created sessions that students join.

pub mod handlers;
