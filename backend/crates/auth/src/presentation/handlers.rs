//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum_extra::extract::WithRejection;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    FetchUserUseCase, SignInInput, SignInUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LoginRequest, MessageResponse, SignUpRequest, UserEnvelope, UserResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    WithRejection(Json(req), _): WithRejection<Json<SignUpRequest>, AuthError>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignUpInput {
            user_name: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = state.config.cookie_config().build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(UserEnvelope {
            user: UserResponse::from(&output.user),
            message: "User created successfully",
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, AuthError>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = state.config.cookie_config().build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(UserEnvelope {
            user: UserResponse::from(&output.user),
            message: "Logged in successfully",
        }),
    ))
}

// ============================================================================
// Fetch User
// ============================================================================

/// GET /api/fetch-user
pub async fn fetch_user<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<UserEnvelope>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    let use_case = FetchUserUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case.execute(token.as_deref()).await?;

    Ok(Json(UserEnvelope {
        user: UserResponse::from(&user),
        message: "User fetched successfully",
    }))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/logout
///
/// Only clears the cookie; the token itself stays valid until it expires.
pub async fn logout<R>(State(state): State<AuthAppState<R>>) -> impl IntoResponse
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let cookie = state.config.cookie_config().build_delete_cookie();

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse {
            message: "Logged out successfully",
        }),
    )
}
