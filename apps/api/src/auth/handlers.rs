//! Axum route handlers for the authentication proxy.

use axum::{extract::State, Json};

use crate::auth::BearerToken;
use crate::backend::types::{
    LoginRequest, MessageResponse, Profile, Session, SignupInitRequest, VerifySignupRequest,
};
use crate::errors::AppError;
use crate::state::AppState;

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// POST /api/v1/auth/signup/init
pub async fn handle_signup_init(
    State(state): State<AppState>,
    Json(request): Json<SignupInitRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    require("name", &request.name)?;
    require("email", &request.email)?;
    require("password", &request.password)?;
    Ok(Json(state.auth.signup_init(&request).await?))
}

/// POST /api/v1/auth/signup/verify
pub async fn handle_verify_signup(
    State(state): State<AppState>,
    Json(request): Json<VerifySignupRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    require("email", &request.email)?;
    require("otp", &request.otp)?;
    Ok(Json(state.auth.verify_signup(&request).await?))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Session>, AppError> {
    require("email", &request.email)?;
    require("password", &request.password)?;
    let session = state.auth.login(&request).await?;
    tracing::info!("User {} logged in", session.user_id);
    Ok(Json(session))
}

/// GET /api/v1/auth/me
pub async fn handle_profile(
    State(state): State<AppState>,
    token: BearerToken,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(state.auth.profile(token.as_str()).await?))
}
