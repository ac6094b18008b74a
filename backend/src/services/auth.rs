//! Authentication core: registration, login, logout and token checks
//!
//! Every operation returns a typed [`AuthError`]; translating kinds to HTTP
//! statuses happens once, in `crate::error`.
//!
//! # Performance
//!
//! Password hashing and verification run on the blocking thread pool, so a
//! slow hash never stalls the async runtime. Token signing uses keys derived
//! once at startup.

use crate::auth::{JwtService, PasswordService, SessionClaims};
use crate::config::{AppConfig, ValidationConfig};
use crate::repositories::{NewUser, StoreError, UserStore};
use session_auth_shared::validation::{
    normalize_email, validate_email, validate_name, validate_password, MAX_PASSWORD_BYTES,
};
use session_auth_shared::{AuthError, TokenError, UserProfile};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey => AuthError::UserExists,
            StoreError::Other(e) => AuthError::store(e),
        }
    }
}

fn record_outcome(operation: &'static str, result: &Result<impl Sized, AuthError>) {
    let outcome = match result {
        Ok(_) => "success",
        Err(e) => e.code(),
    };
    metrics::counter!(operation, "outcome" => outcome).increment(1);
}

/// Authentication service
///
/// Cheap to clone; shared by every request through `AppState`.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    jwt: JwtService,
    passwords: PasswordService,
    rules: ValidationConfig,
    /// Verified against when the email is unknown, so a miss costs as much
    /// as a wrong password.
    dummy_hash: Arc<str>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn UserStore>,
        jwt: JwtService,
        passwords: PasswordService,
        rules: ValidationConfig,
    ) -> anyhow::Result<Self> {
        let dummy_hash = passwords.hash("session-auth-timing-equalizer")?;

        Ok(Self {
            store,
            jwt,
            passwords,
            rules,
            dummy_hash: dummy_hash.into(),
        })
    }

    /// Build the service from application configuration
    pub fn from_config(store: Arc<dyn UserStore>, config: &AppConfig) -> anyhow::Result<Self> {
        Self::new(
            store,
            JwtService::new(&config.jwt.secret, config.jwt.token_expiry_secs),
            PasswordService::new(&config.password),
            config.validation.clone(),
        )
    }

    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    /// Register a new user
    ///
    /// The returned profile never includes the password hash.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, AuthError> {
        let result = self.register_inner(name, email, password).await;
        record_outcome("auth_register_total", &result);
        result
    }

    async fn register_inner(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, AuthError> {
        let email = normalize_email(email);
        validate_name(name).map_err(AuthError::ValidationFailed)?;
        validate_email(&email, self.rules.require_email_format)
            .map_err(AuthError::ValidationFailed)?;
        validate_password(password, self.rules.min_password_length)
            .map_err(AuthError::ValidationFailed)?;

        if self.store.find_by_email(&email).await?.is_some() {
            debug!("Registration rejected: email already registered");
            return Err(AuthError::UserExists);
        }

        let password_hash = self
            .passwords
            .hash_async(password.to_string())
            .await
            .map_err(AuthError::internal)?;

        // A concurrent registration can win between the check above and this
        // insert; the store's unique constraint turns that into UserExists.
        let user = self
            .store
            .insert(NewUser {
                name: name.trim().to_string(),
                email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user.into())
    }

    /// Log in with email and password, returning a signed session token
    ///
    /// Unknown email and wrong password are both `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let result = self.login_inner(email, password).await;
        record_outcome("auth_login_total", &result);
        result
    }

    async fn login_inner(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self.store.find_by_email(&email).await?;

        let stored_hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash.to_string(),
        };
        let valid = PasswordService::verify_async(password.to_string(), stored_hash)
            .await
            .map_err(AuthError::internal)?;

        // Registration never stores a password over the limit, so a longer
        // input cannot be the right one even if a hash would accept it.
        let within_limit = password.len() <= MAX_PASSWORD_BYTES;
        let user = match user {
            Some(user) if valid && within_limit => user,
            _ => {
                debug!("Login rejected: invalid credentials");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let token = self
            .jwt
            .issue(&SessionClaims {
                id: user.id,
                email: user.email,
            })
            .map_err(AuthError::internal)?;

        info!(user_id = %user.id, "User logged in");
        Ok(token)
    }

    /// Acknowledge a logout
    ///
    /// Sessions are stateless, so there is nothing to invalidate here; the
    /// client discards its token.
    pub fn logout(&self) -> Result<(), AuthError> {
        debug!("Logout acknowledged");
        Ok(())
    }

    /// Verify a session token and return the identity it asserts
    pub fn verify_token(&self, token: &str) -> Result<SessionClaims, AuthError> {
        self.jwt.verify(token).map_err(AuthError::from)
    }

    /// Profile of the user a verified token points at
    ///
    /// A token whose user no longer exists is treated as invalid.
    pub async fn profile(&self, user_id: Uuid) -> Result<UserProfile, AuthError> {
        self.store
            .find_by_id(user_id)
            .await?
            .map(UserProfile::from)
            .ok_or(AuthError::Token(TokenError::Invalid))
    }
}
