//! Authentication primitives
//!
//! Password hashing (bcrypt by default, argon2 selectable), HS256 session
//! tokens, and the bearer-token extractor for protected routes.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService, SessionClaims};
pub use middleware::AuthUser;
pub use password::{PasswordService, MAX_BCRYPT_COST, MIN_BCRYPT_COST};
