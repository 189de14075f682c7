use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginOutcome, LoginRequest, SecretPageResponse, SignupRequest, SignupResponse},
        gate::AuthedUser,
        password::{hash_password, verify_password},
        repo::User,
        token::generate_access_token,
    },
    error::AppError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(signup))
        .route("/users/:id", get(secret_page))
        .route("/sessions", post(login))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let name = payload.name.trim();
    let email = payload
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());

    let mut errors = Map::new();
    if name.is_empty() {
        errors.insert("name".into(), Value::from("name is required"));
    }
    if payload.password.is_empty() {
        errors.insert("password".into(), Value::from("password is required"));
    }
    if let Some(email) = email {
        if !is_valid_email(email) {
            errors.insert("email".into(), Value::from("email is not a valid address"));
        }
    }
    if !errors.is_empty() {
        warn!(name = %payload.name, "signup rejected by field validation");
        return Err(AppError::validation(
            "Could not create user.",
            Value::Object(errors),
        ));
    }

    let hash =
        hash_password(&payload.password).map_err(|e| AppError::store("Could not create user.", e))?;
    let access_token = generate_access_token();

    let user = User::create(&state.db, name, email, &hash, &access_token).await?;

    info!(user_id = %user.id, name = %user.name, "user created");
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created.",
            user_id: user.id,
            access_token: user.access_token,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<LoginOutcome, AppError> {
    let user = User::find_by_name(&state.db, payload.name.trim())
        .await
        .map_err(|e| {
            error!(error = %e, "user lookup failed");
            AppError::store("Could not log in", e)
        })?;

    let Some(user) = user else {
        warn!(name = %payload.name, "login with unknown name");
        return Ok(LoginOutcome::credentials_invalid());
    };

    let ok = verify_password(&payload.password, &user.password_hash)
        .map_err(|e| AppError::store("Could not log in", e))?;
    if !ok {
        warn!(user_id = %user.id, "login with wrong password");
        return Ok(LoginOutcome::credentials_invalid());
    }

    info!(user_id = %user.id, "user logged in");
    // The token issued at signup, never a fresh one.
    Ok(LoginOutcome::Success {
        user_id: user.id,
        access_token: user.access_token,
    })
}

/// Identity comes from the token, not from the path segment.
#[instrument(skip_all)]
pub async fn secret_page(
    AuthedUser(user): AuthedUser,
    Path(_id): Path<String>,
) -> (StatusCode, Json<SecretPageResponse>) {
    info!(user_id = %user.id, "secret page served");
    (
        StatusCode::CREATED,
        Json(SecretPageResponse {
            login_message: format!("This is a super secret message for {}", user.name),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_format_check() {
        assert!(is_valid_email("a@x.com"));
        assert!(!is_valid_email("not-an-address"));
        assert!(!is_valid_email("two@at@signs.com"));
    }

    #[test]
    fn secret_message_names_the_authenticated_user() {
        let body = SecretPageResponse {
            login_message: format!("This is a super secret message for {}", "Ann"),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("loginMessage"));
        assert!(json.contains("This is a super secret message for Ann"));
    }
}
