use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

/// Response returned after signup: the only place the access token is
/// ever revealed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: &'static str,
    pub user_id: Uuid,
    pub access_token: String,
}

/// Outcome of a login attempt. Bad credentials soft-fail: a 200
/// carrying only a message, never saying whether the name or the
/// password was wrong. Store failures take the 400 path instead.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LoginOutcome {
    #[serde(rename_all = "camelCase")]
    Success { user_id: Uuid, access_token: String },
    CredentialsInvalid { message: &'static str },
}

impl LoginOutcome {
    pub fn credentials_invalid() -> Self {
        Self::CredentialsInvalid {
            message: "Could not log in, please try again",
        }
    }
}

impl IntoResponse for LoginOutcome {
    fn into_response(self) -> Response {
        let status = match &self {
            LoginOutcome::Success { .. } => StatusCode::CREATED,
            LoginOutcome::CredentialsInvalid { .. } => StatusCode::OK,
        };
        (status, Json(self)).into_response()
    }
}

/// Body of the protected page behind the token gate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretPageResponse {
    pub login_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_response_uses_wire_names() {
        let response = SignupResponse {
            message: "User created.",
            user_id: Uuid::new_v4(),
            access_token: "ab".repeat(128),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("userId"));
        assert!(json.contains("accessToken"));
    }

    #[test]
    fn login_success_carries_token() {
        let outcome = LoginOutcome::Success {
            user_id: Uuid::new_v4(),
            access_token: "cd".repeat(128),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("accessToken"));
        assert!(json.contains("userId"));
    }

    #[test]
    fn login_soft_fail_has_message_and_no_token() {
        let outcome = LoginOutcome::credentials_invalid();
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("Could not log in, please try again"));
        assert!(!json.contains("accessToken"));
    }

    #[test]
    fn login_soft_fail_is_a_success_status() {
        let res = LoginOutcome::credentials_invalid().into_response();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[test]
    fn login_success_is_created() {
        let res = LoginOutcome::Success {
            user_id: Uuid::new_v4(),
            access_token: "ef".repeat(128),
        }
        .into_response();
        assert_eq!(res.status(), StatusCode::CREATED);
    }
}
