//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the credential store and the token and password primitives.

pub mod auth;

pub use auth::AuthService;
