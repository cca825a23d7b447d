//! Password-reset orchestration: the activate handler looks up the account
//! and mints a reset token, the confirm handler verifies the token and
//! applies the new credential. The token itself is stateless; see
//! [`crate::auth::reset`].

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::auth::{password, reset};
use crate::db;
use crate::error::{AppError, FieldErrors};
use crate::state::SharedState;
use crate::validate;

#[derive(Deserialize)]
pub struct ActivateRequest {
    pub email: Option<String>,
}

// The token travels in the request body alongside the new password.
#[derive(Deserialize)]
pub struct ConfirmRequest {
    pub token: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn activate(
    State(state): State<SharedState>,
    Json(req): Json<ActivateRequest>,
) -> Result<Json<Value>, AppError> {
    let email = req.email.unwrap_or_default();

    let mut errors = FieldErrors::new();
    validate::email(&mut errors, &email);
    errors.into_result()?;

    let user = db::users::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::NotFound("This email does not exist.".to_string()))?;

    let token = reset::issue(&user.email, &state.config.secret_key).map_err(AppError::Internal)?;

    match &state.mailer {
        Some(mailer) => {
            let confirm_url = format!("{}/api/v1/auth/reset-password/confirm", state.config.base_url);
            mailer
                .send_password_reset(&user.email, &token, &confirm_url)
                .await
                .map_err(AppError::Delivery)?;

            tracing::info!(user_id = %user.id, "Password reset email sent");
            Ok(Json(json!({ "message": "A password reset email has been sent." })))
        }
        // No SMTP channel configured: hand the token back directly so the
        // flow stays usable in development.
        None => {
            tracing::warn!(user_id = %user.id, "SMTP not configured, returning reset token in response");
            Ok(Json(json!({ "token": token })))
        }
    }
}

pub async fn confirm(
    State(state): State<SharedState>,
    Json(req): Json<ConfirmRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let Some(token) = req.token else {
        return Err(AppError::Validation(FieldErrors::single(
            "token",
            "This field is required.",
        )));
    };

    let claims = reset::verify(&token, &state.config.secret_key)
        .map_err(|e| AppError::Validation(FieldErrors::single("token", &e.to_string())))?;

    let pw = req.password.unwrap_or_default();
    let mut errors = FieldErrors::new();
    validate::password(&mut errors, &pw);
    errors.into_result()?;

    let user = db::users::find_by_email(&state.pool, &claims.email)
        .await?
        .ok_or_else(|| AppError::NotFound("This email does not exist.".to_string()))?;

    let pw_hash = password::hash(&pw).map_err(AppError::Internal)?;
    db::users::update_password(&state.pool, user.id, &pw_hash).await?;

    tracing::info!(user_id = %user.id, jti = %claims.jti, "Password reset completed");

    Ok(Json(MessageResponse {
        message: "Password reset successfully".to_string(),
    }))
}
