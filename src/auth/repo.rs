use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::AppError;

/// User record in the database. The credential columns never serialize.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub access_token: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl User {
    /// Insert a new user. Uniqueness on name and email is enforced by
    /// the store; a violation comes back as field-level validation
    /// detail rather than an opaque database error.
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: Option<&str>,
        password_hash: &str,
        access_token: &str,
    ) -> Result<User, AppError> {
        let inserted = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, access_token)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, access_token, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(access_token)
        .fetch_one(db)
        .await;

        inserted.map_err(|e| match unique_violation_field(&e) {
            Some(field) => {
                let mut errors = serde_json::Map::new();
                errors.insert(field.to_string(), json!(format!("{field} is already taken")));
                AppError::validation("Could not create user.", serde_json::Value::Object(errors))
            }
            None => AppError::store("Could not create user.", e),
        })
    }

    /// Find a user by login name.
    pub async fn find_by_name(db: &PgPool, name: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, access_token, created_at
            FROM users
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(db)
        .await
    }

    /// Find the single user holding the supplied access token, if any.
    /// Read-only; the gate never writes through this.
    pub async fn find_by_access_token(
        db: &PgPool,
        token: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, access_token, created_at
            FROM users
            WHERE access_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(db)
        .await
    }
}

/// Which user column a unique-constraint violation points at, if the
/// error is one at all.
fn unique_violation_field(err: &sqlx::Error) -> Option<&'static str> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    if !matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) {
        return None;
    }
    match db_err.constraint() {
        Some(c) if c.contains("email") => Some("email"),
        _ => Some("name"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_not_unique_violations() {
        assert_eq!(unique_violation_field(&sqlx::Error::RowNotFound), None);
    }

    #[test]
    fn user_serialization_hides_credentials() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ann".into(),
            email: Some("a@x.com".into()),
            password_hash: "argon2-hash".into(),
            access_token: "deadbeef".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("Ann"));
        assert!(!json.contains("argon2-hash"));
        assert!(!json.contains("deadbeef"));
    }
}
