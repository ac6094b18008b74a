//! Bearer token extraction
//!
//! Protected routes take an [`AuthUser`] argument; the extractor rejects the
//! request with 401 before the handler runs when the token is missing,
//! malformed, forged or expired.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use session_auth_shared::TokenError;
use uuid::Uuid;

/// Authenticated user extracted from a session token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::Auth(TokenError::Invalid.into()))?;

        let claims = app_state.auth().verify_token(token)?;

        Ok(AuthUser {
            user_id: claims.id,
            email: claims.email,
        })
    }
}
