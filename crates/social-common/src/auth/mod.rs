//! Authentication utilities

mod jwt;
mod password;
mod session;

pub use jwt::{AccessToken, Claims, JwtService};
pub use password::{hash_password, validate_password_strength, verify_password};
pub use session::generate_session_id;
