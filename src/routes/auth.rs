use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::auth::jwt::{self, TokenKind};
use crate::auth::password;
use crate::db;
use crate::error::{AppError, FieldErrors};
use crate::models::User;
use crate::state::SharedState;
use crate::validate;

// Request fields are Option so a missing field surfaces as a field-level
// "This field is required." error rather than a body-decode rejection.
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Deserialize)]
pub struct TokenRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

#[derive(Serialize)]
pub struct AccessTokenResponse {
    pub access: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn issue_token_pair(user: &User, secret: &str) -> Result<TokenPairResponse, AppError> {
    let access = jwt::issue(user.id, TokenKind::Access, secret).map_err(AppError::Internal)?;
    let refresh = jwt::issue(user.id, TokenKind::Refresh, secret).map_err(AppError::Internal)?;
    Ok(TokenPairResponse { access, refresh })
}

pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenPairResponse>), AppError> {
    let email = req.email.unwrap_or_default();
    let pw = req.password.unwrap_or_default();
    let first_name = req.first_name.unwrap_or_default();
    let last_name = req.last_name.unwrap_or_default();

    let mut errors = FieldErrors::new();
    validate::email(&mut errors, &email);
    validate::password(&mut errors, &pw);
    validate::name(&mut errors, "first_name", &first_name);
    validate::name(&mut errors, "last_name", &last_name);
    errors.into_result()?;

    let pw_hash = password::hash(&pw).map_err(AppError::Internal)?;

    let user = db::users::create(&state.pool, &email, &pw_hash, &first_name, &last_name)
        .await
        .map_err(|e| {
            if db::users::is_unique_violation(&e) {
                AppError::Validation(FieldErrors::single(
                    "email",
                    "A user with that email already exists.",
                ))
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::info!(user_id = %user.id, "User registered");

    let pair = issue_token_pair(&user, &state.config.secret_key)?;
    Ok((StatusCode::CREATED, Json(pair)))
}

pub async fn token(
    State(state): State<SharedState>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<TokenPairResponse>, AppError> {
    let email = req.email.unwrap_or_default();
    let pw = req.password.unwrap_or_default();

    let mut errors = FieldErrors::new();
    if email.is_empty() {
        errors.add("email", "This field is required.");
    }
    if pw.is_empty() {
        errors.add("password", "This field is required.");
    }
    errors.into_result()?;

    if state.login_limiter.check(&email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let user = db::users::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = password::verify(&pw, &user.password_hash).map_err(AppError::Internal)?;
    if !valid {
        state.login_limiter.record_failure(&email);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let pair = issue_token_pair(&user, &state.config.secret_key)?;
    Ok(Json(pair))
}

pub async fn refresh(
    State(state): State<SharedState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let Some(refresh_token) = req.refresh else {
        return Err(AppError::Validation(FieldErrors::single(
            "refresh",
            "This field is required.",
        )));
    };

    let claims = jwt::decode_token(&refresh_token, TokenKind::Refresh, &state.config.secret_key)
        .map_err(|_| AppError::Unauthorized("Invalid or expired refresh token".to_string()))?;

    // The account may have been deleted since the refresh token was issued.
    let user = db::users::find_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    let access =
        jwt::issue(user.id, TokenKind::Access, &state.config.secret_key).map_err(AppError::Internal)?;
    Ok(Json(AccessTokenResponse { access }))
}

pub async fn who_am_i(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<Json<User>, AppError> {
    let user = db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<SharedState>,
    auth: AuthUser,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    let email = req.email.unwrap_or_default();
    let first_name = req.first_name.unwrap_or_default();
    let last_name = req.last_name.unwrap_or_default();

    let mut errors = FieldErrors::new();
    validate::email(&mut errors, &email);
    validate::name(&mut errors, "first_name", &first_name);
    validate::name(&mut errors, "last_name", &last_name);
    errors.into_result()?;

    let user = db::users::update_profile(&state.pool, auth.user_id, &email, &first_name, &last_name)
        .await
        .map_err(|e| match e {
            ref e if db::users::is_unique_violation(e) => AppError::Validation(
                FieldErrors::single("email", "A user with that email already exists."),
            ),
            sqlx::Error::RowNotFound => AppError::Unauthorized("User not found".to_string()),
            e => AppError::Database(e),
        })?;

    Ok(Json(user))
}

pub async fn update_password(
    State(state): State<SharedState>,
    auth: AuthUser,
    Json(req): Json<UpdatePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let pw = req.password.unwrap_or_default();

    let mut errors = FieldErrors::new();
    validate::password(&mut errors, &pw);
    errors.into_result()?;

    let pw_hash = password::hash(&pw).map_err(AppError::Internal)?;
    db::users::update_password(&state.pool, auth.user_id, &pw_hash).await?;

    tracing::info!(user_id = %auth.user_id, "Password updated");

    Ok(Json(MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}
