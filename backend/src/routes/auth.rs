//! Authentication routes
//!
//! Thin JSON wrappers over [`AuthService`](crate::services::AuthService):
//! each handler unpacks the body, calls one core operation and shapes the
//! response. Error kinds are mapped to statuses by `ApiError`.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use secrecy::ExposeSecret;
use session_auth_shared::types::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, UserProfile,
};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

/// Register a new user
///
/// POST /api/auth/register
async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(req) = payload?;
    state
        .auth()
        .register(&req.name, &req.email, req.password.expose_secret())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// Log in with email and password
///
/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = payload?;
    let token = state
        .auth()
        .login(&req.email, req.password.expose_secret())
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}

/// Log out
///
/// POST /api/auth/logout
///
/// Nothing is held server-side; the client drops its token.
async fn logout(State(state): State<AppState>) -> ApiResult<Json<MessageResponse>> {
    state.auth().logout()?;
    Ok(Json(MessageResponse::new("Logout successful")))
}

/// Current user profile
///
/// GET /api/auth/me
///
/// # Authentication
/// Requires valid Bearer token in Authorization header.
async fn me(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<UserProfile>> {
    let profile = state.auth().profile(user.user_id).await?;
    Ok(Json(profile))
}
