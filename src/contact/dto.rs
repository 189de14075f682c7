use serde::{Deserialize, Serialize};

/// Contact-form submission. Nothing is persisted.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Binary outcome flag; failure detail never crosses the wire.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub status: &'static str,
}
