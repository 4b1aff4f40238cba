pub mod session;

pub use session::{Claims, Session, UserRole, issue_token};
