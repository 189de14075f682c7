use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, error, warn};

use crate::{auth::repo::User, error::AppError, state::AppState};

/// The access-token gate. Resolves the raw `Authorization` header (no
/// scheme prefix) to a stored user and hands the full record to the
/// handler. A missing, empty or unknown token rejects with 403; a store
/// failure rejects with 400.
pub struct AuthedUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if token.is_empty() {
            warn!("request without access token");
            return Err(AppError::Unauthorized);
        }

        let user = User::find_by_access_token(&state.db, token)
            .await
            .map_err(|e| {
                error!(error = %e, "access token lookup failed");
                AppError::store("access denied", e)
            })?;

        match user {
            Some(user) => {
                debug!(user_id = %user.id, "access token accepted");
                Ok(AuthedUser(user))
            }
            None => {
                warn!("unknown access token");
                Err(AppError::Unauthorized)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_headers(req: Request<()>) -> Parts {
        req.into_parts().0
    }

    #[tokio::test]
    async fn missing_header_is_rejected_before_any_lookup() {
        let state = AppState::fake();
        let mut parts = parts_with_headers(Request::builder().uri("/users/1").body(()).unwrap());
        let err = AuthedUser::from_request_parts(&mut parts, &state)
            .await
            .err()
            .expect("gate should reject");
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn empty_header_is_rejected_before_any_lookup() {
        let state = AppState::fake();
        let mut parts = parts_with_headers(
            Request::builder()
                .uri("/users/1")
                .header("Authorization", "")
                .body(())
                .unwrap(),
        );
        let err = AuthedUser::from_request_parts(&mut parts, &state)
            .await
            .err()
            .expect("gate should reject");
        assert!(matches!(err, AppError::Unauthorized));
    }
}
