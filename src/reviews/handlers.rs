use axum::{extract::State, routing::get, Json, Router};
use tracing::{error, info, instrument};

use crate::{
    auth::gate::AuthedUser,
    error::AppError,
    reviews::{
        dto::CreateReviewRequest,
        repo::{self, Review},
    },
    state::AppState,
};

/// Whether submissions go through the token gate is decided once, at
/// router build time, from configuration.
pub fn routes(require_auth: bool) -> Router<AppState> {
    let reviews = if require_auth {
        get(list_reviews).post(create_review_authed)
    } else {
        get(list_reviews).post(create_review)
    };
    Router::new().route("/reviews", reviews)
}

#[instrument(skip(state))]
pub async fn list_reviews(State(state): State<AppState>) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = repo::list_recent(&state.db).await.map_err(|e| {
        error!(error = %e, "review listing failed");
        AppError::store("Could not load the reviews", e)
    })?;
    Ok(Json(reviews))
}

#[instrument(skip(state, payload))]
pub async fn create_review(
    State(state): State<AppState>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<Json<Review>, AppError> {
    let review = repo::create(&state.db, &payload.message, payload.reviewer.as_deref()).await?;
    info!(review_id = %review.id, "review saved");
    Ok(Json(review))
}

#[instrument(skip_all)]
pub async fn create_review_authed(
    State(state): State<AppState>,
    AuthedUser(user): AuthedUser,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<Json<Review>, AppError> {
    // A signed-in submitter without an explicit reviewer signs with
    // their account name.
    let reviewer = payload.reviewer.as_deref().unwrap_or(&user.name);
    let review = repo::create(&state.db, &payload.message, Some(reviewer)).await?;
    info!(review_id = %review.id, user_id = %user.id, "review saved");
    Ok(Json(review))
}
