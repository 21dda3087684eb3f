pub mod career;
pub mod chat;
pub mod class;
pub mod job;
pub mod learning;
pub mod quiz;
pub mod user;
