//! Handlers for the `/auth` resource (register, tokens, logout, profile).

use atelier_core::error::CoreError;
use atelier_core::roles::Role;
use atelier_db::models::session::CreateSession;
use atelier_db::models::user::{CreateUser, UpdateProfile, User, UserResponse};
use atelier_db::repositories::{SessionRepo, UserRepo};
use axum::extract::State;
use axum::http::{header::USER_AGENT, HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, max = 150, message = "must be 1-150 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 150, message = "must be 1-150 characters"))]
    pub last_name: String,
    /// `client` (default) or `designer`.
    pub user_type: Option<String>,
}

/// Request body for `POST /auth/token`.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/token/refresh` and `POST /auth/logout`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `PATCH /auth/profile`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProfileRequest {
    #[validate(length(min = 1, max = 150, message = "must be 1-150 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 150, message = "must be 1-150 characters"))]
    pub last_name: Option<String>,
    #[validate(length(max = 20, message = "must be at most 20 characters"))]
    pub phone: Option<String>,
    pub bio: Option<String>,
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub company_name: Option<String>,
    #[validate(range(min = 0, max = 80, message = "must be between 0 and 80"))]
    pub experience_years: Option<i32>,
    #[validate(url(message = "must be a valid URL"))]
    pub website: Option<String>,
}

/// Successful authentication response returned by register, token and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Self-service sign-up for clients and designers. Returns 201 with tokens.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input.validate()?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(format!("password: {msg}"))))?;

    let role = match input.user_type.as_deref() {
        None | Some("") => Role::Client,
        Some(name) => Role::from_name(name)?,
    };
    if !role.is_self_registrable() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "user_type '{role}' cannot be chosen at registration"
        ))));
    }

    let email = input.email.trim().to_lowercase();
    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "A user with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            password_hash,
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            user_type: role.as_str().to_string(),
            is_staff: false,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, role = %role, "User registered");

    let response = create_auth_response(&state, user, user_agent(&headers)).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/token
///
/// Exchange email + password for access and refresh tokens.
pub async fn obtain_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(input): AppJson<TokenRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response = create_auth_response(&state, user, user_agent(&headers)).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/token/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens. The old
/// refresh token is revoked (rotation).
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(input): AppJson<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response = create_auth_response(&state, user, user_agent(&headers)).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth.actor.id).await?;
    tracing::info!(user_id = auth.actor.id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/profile
pub async fn get_profile(auth: AuthUser) -> Json<DataResponse<UserResponse>> {
    Json(DataResponse {
        data: UserResponse::from(auth.user),
    })
}

/// PATCH /api/v1/auth/profile
///
/// Update the caller's own profile fields. Email, account kind and staff
/// flag are not editable here.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<ProfileRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    input.validate()?;

    let patch = UpdateProfile {
        first_name: input.first_name.map(|s| s.trim().to_string()),
        last_name: input.last_name.map(|s| s.trim().to_string()),
        phone: input.phone,
        bio: input.bio,
        company_name: input.company_name,
        experience_years: input.experience_years,
        website: input.website,
    };

    let user = UserRepo::update_profile(&state.pool, auth.actor.id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("User", auth.actor.id)))?;

    Ok(Json(DataResponse {
        data: UserResponse::from(user),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    user: User,
    user_agent: Option<String>,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, &user.user_type, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = CreateSession {
        user_id: user.id,
        refresh_token_hash: refresh_hash,
        expires_at,
        user_agent,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserResponse::from(user),
    })
}
