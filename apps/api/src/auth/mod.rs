//! Authentication: token issuance, password hashing, and the bearer extractors
//! every protected handler starts with.

pub mod extractor;
pub mod handlers;
pub mod password;
pub mod token;

pub use extractor::{AuthUser, TeacherUser};
pub use token::TokenService;
