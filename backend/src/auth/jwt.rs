//! Session token issuance and verification
//!
//! Tokens are HS256 JWTs carrying the subject's id and email. They are not
//! stored anywhere server-side: a token is valid exactly when its signature
//! checks out against the current secret and its `exp` has not passed.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use session_auth_shared::TokenError;
use std::sync::Arc;
use uuid::Uuid;

/// Identity asserted by a session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub id: Uuid,
    pub email: String,
}

/// JWT claims as encoded on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub id: Uuid,
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl From<Claims> for SessionClaims {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            email: claims.email,
        }
    }
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Token issuer and verifier
///
/// Built once from the configured secret and shared through `AppState`;
/// cloning only bumps the key `Arc`s.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    validation: Arc<Validation>,
    token_ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &str, token_expiry_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        // jsonwebtoken accepts `exp == now`; a token is only live while `now < exp`
        validation.reject_tokens_expiring_in_less_than = 1;

        Self {
            keys: JwtKeys::new(secret),
            validation: Arc::new(validation),
            token_ttl: Duration::seconds(token_expiry_secs),
        }
    }

    /// Default token lifetime
    #[inline]
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Issue a token for `claims` with the default lifetime
    #[inline]
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_with_ttl(claims, self.token_ttl)
    }

    /// Issue a token for `claims` valid for `ttl` from now
    pub fn issue_with_ttl(
        &self,
        claims: &SessionClaims,
        ttl: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(claims, Utc::now(), ttl)
    }

    /// Issue a token as if minted at `issued_at`
    pub fn issue_at(
        &self,
        claims: &SessionClaims,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            id: claims.id,
            email: claims.email.clone(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
    }

    /// Check signature and expiry, returning the asserted identity
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map(|data| data.claims.into())
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}
