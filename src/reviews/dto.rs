use serde::Deserialize;

/// Request body for a guestbook submission. The saved `Review` row is
/// returned as-is, so no separate response struct exists.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub message: String,
    #[serde(default)]
    pub reviewer: Option<String>,
}
