//! Credential store
//!
//! The authentication core only talks to storage through [`UserStore`].
//! Implementations must enforce email uniqueness themselves: the core's
//! existence check is advisory and two concurrent registrations can both
//! pass it, so the losing insert has to come back as
//! [`StoreError::DuplicateKey`].

pub mod memory;
pub mod user;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use session_auth_shared::UserProfile;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

pub use memory::InMemoryUserStore;
pub use user::PgUserStore;

const REDACTED: &str = "[REDACTED]";

/// User record as held by the store
///
/// `Debug` never prints the password hash.
#[derive(Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &REDACTED)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl From<UserRecord> for UserProfile {
    fn from(user: UserRecord) -> Self {
        UserProfile {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Input for creating a user
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &REDACTED)
            .finish()
    }
}

/// Store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateKey,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateKey
            }
            _ => StoreError::Other(err.into()),
        }
    }
}

/// Persistence boundary for user identities, keyed uniquely by email
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by (normalized) email
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Look up a user by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    /// Persist a new user; a taken email is `StoreError::DuplicateKey`
    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    /// Cheap liveness check for readiness probes
    async fn ping(&self) -> Result<(), StoreError>;
}
