use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::AppError;

pub const MESSAGE_MIN_CHARS: usize = 5;
pub const MESSAGE_MAX_CHARS: usize = 140;
/// The feed never returns more than this many entries.
pub const FEED_LIMIT: i64 = 20;

/// Guestbook entry. `created_at` is assigned by the store and is the
/// sole ordering key; `hearts` defaults to zero and nothing mutates it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub message: String,
    pub reviewer: Option<String>,
    pub hearts: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Content-length policy on the message, checked before any row is
/// written. Counted in characters, not bytes.
fn validate_message(message: &str) -> Result<(), AppError> {
    let len = message.chars().count();
    if len < MESSAGE_MIN_CHARS {
        return Err(AppError::validation(
            "Could not save review",
            json!({
                "message": format!("is shorter than the minimum allowed length ({MESSAGE_MIN_CHARS})")
            }),
        ));
    }
    if len > MESSAGE_MAX_CHARS {
        return Err(AppError::validation(
            "Could not save review",
            json!({
                "message": format!("is longer than the maximum allowed length ({MESSAGE_MAX_CHARS})")
            }),
        ));
    }
    Ok(())
}

/// Persist a new review with a server-assigned timestamp.
pub async fn create(
    db: &PgPool,
    message: &str,
    reviewer: Option<&str>,
) -> Result<Review, AppError> {
    validate_message(message)?;
    sqlx::query_as::<_, Review>(
        r#"
        INSERT INTO reviews (message, reviewer)
        VALUES ($1, $2)
        RETURNING id, message, reviewer, hearts, created_at
        "#,
    )
    .bind(message)
    .bind(reviewer)
    .fetch_one(db)
    .await
    .map_err(|e| AppError::store("Could not save review", e))
}

/// The most recent reviews, newest first, capped at `FEED_LIMIT`.
pub async fn list_recent(db: &PgPool) -> Result<Vec<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        r#"
        SELECT id, message, reviewer, hearts, created_at
        FROM reviews
        ORDER BY created_at DESC
        LIMIT $1
        "#,
    )
    .bind(FEED_LIMIT)
    .fetch_all(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_at_bounds_is_accepted() {
        assert!(validate_message(&"x".repeat(5)).is_ok());
        assert!(validate_message(&"x".repeat(140)).is_ok());
    }

    #[test]
    fn message_outside_bounds_is_rejected() {
        assert!(validate_message(&"x".repeat(4)).is_err());
        assert!(validate_message(&"x".repeat(141)).is_err());
    }

    #[test]
    fn bounds_count_characters_not_bytes() {
        // 140 two-byte characters stay within the policy.
        assert!(validate_message(&"ä".repeat(140)).is_ok());
        assert!(validate_message(&"ä".repeat(141)).is_err());
    }

    #[test]
    fn length_rejection_carries_field_detail() {
        let err = validate_message("hi").unwrap_err();
        let AppError::Validation { message, errors } = err else {
            panic!("expected a validation error");
        };
        assert_eq!(message, "Could not save review");
        assert!(errors["message"]
            .as_str()
            .unwrap()
            .contains("minimum allowed length"));
    }

    #[test]
    fn feed_is_capped_at_twenty() {
        assert_eq!(FEED_LIMIT, 20);
    }

    #[test]
    fn review_serializes_with_wire_names() {
        let review = Review {
            id: Uuid::new_v4(),
            message: "lovely yoga".into(),
            reviewer: None,
            hearts: 0,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&review).unwrap();
        assert!(json.contains("createdAt"));
        assert!(json.contains("hearts"));
    }
}
