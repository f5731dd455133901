use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{TimeDelta, Utc};
use garde::Validate;
use rand::Rng;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, IntoActiveModel,
    QueryFilter,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::auth::password::{hash_password, strong_password, verify_password};
use crate::auth::token::issue_session;
use crate::entities::{prelude::*, sea_orm_active_enums::Role, user};
use crate::error::{AppError, AppResult};
use crate::router::AppState;

const OTP_TTL_MINUTES: i64 = 5;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[garde(email)]
    pub email: String,
    #[garde(custom(strong_password))]
    pub password: String,
    #[garde(skip)]
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub new_password: String,
}

fn generate_otp() -> String {
    rand::thread_rng().gen_range(100_000..999_999).to_string()
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;
    let role = payload.role.unwrap_or(Role::User);

    // Email uniqueness is scoped per role: the same address may register
    // again under a different role.
    let existing = User::find()
        .filter(user::Column::Email.eq(payload.email.clone()))
        .filter(user::Column::Role.eq(role))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(format!(
            "Email is already registered for the role: {}",
            role.to_value()
        )));
    }

    let user = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(payload.email),
        password: Set(hash_password(&payload.password)?),
        role: Set(role),
        otp: Set(None),
        otp_expiry: Set(None),
        ..Default::default()
    };
    let user = user.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    payload.validate()?;

    let user = User::find()
        .filter(user::Column::Email.eq(payload.email))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("invalid email/password".into()))?;

    if !verify_password(&payload.password, &user.password)? {
        return Err(AppError::NotFound("invalid email/password".into()));
    }

    let token = issue_session(&state.db, user.id).await?;

    Ok(Json(json!({ "token": format!("Bearer {token}") })))
}

pub async fn request_otp(
    State(state): State<AppState>,
    Json(payload): Json<EmailRequest>,
) -> AppResult<impl IntoResponse> {
    let user = User::find()
        .filter(user::Column::Email.eq(payload.email))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Email not found".into()))?;

    let otp = generate_otp();
    let email = user.email.clone();

    let mut user = user.into_active_model();
    user.otp = Set(Some(otp.clone()));
    user.otp_expiry = Set(Some(
        (Utc::now() + TimeDelta::minutes(OTP_TTL_MINUTES)).naive_utc(),
    ));
    user.update(&state.db).await?;

    state.mailer.send_otp(&email, &otp).await?;

    Ok(Json(json!({ "message": "OTP sent to email" })))
}

pub async fn verify_otp(
    State(state): State<AppState>,
    Json(payload): Json<VerifyOtpRequest>,
) -> AppResult<impl IntoResponse> {
    let Some(user) = User::find()
        .filter(user::Column::Email.eq(payload.email))
        .one(&state.db)
        .await?
    else {
        return Err(AppError::Validation("Invalid or expired OTP".into()));
    };

    let valid = user.otp.as_deref() == Some(payload.otp.as_str())
        && user
            .otp_expiry
            .is_some_and(|expiry| expiry >= Utc::now().naive_utc());
    if !valid {
        return Err(AppError::Validation("Invalid or expired OTP".into()));
    }

    let mut user = user.into_active_model();
    user.otp = Set(None);
    user.otp_expiry = Set(None);
    user.update(&state.db).await?;

    Ok(Json(json!({ "message": "OTP verified successfully" })))
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> AppResult<impl IntoResponse> {
    let user = User::find()
        .filter(user::Column::Email.eq(payload.email))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Email not found".into()))?;

    let mut user = user.into_active_model();
    user.password = Set(hash_password(&payload.new_password)?);
    user.update(&state.db).await?;

    Ok(Json(json!({ "message": "Password reset successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_is_six_digits() {
        for _ in 0..50 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 6);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn register_rejects_malformed_email() {
        let payload = RegisterRequest {
            email: "not-an-email".into(),
            password: "G00d&Strong".into(),
            role: None,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn register_rejects_weak_password() {
        let payload = RegisterRequest {
            email: "a@x.com".into(),
            password: "password".into(),
            role: Some(Role::Host),
        };
        assert!(payload.validate().is_err());
    }
}
