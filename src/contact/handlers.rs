use axum::{extract::State, routing::post, Json, Router};
use tracing::{error, info, instrument};

use crate::{
    contact::dto::{ContactRequest, ContactResponse},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/contact", post(send_message))
}

#[instrument(skip(state, payload))]
pub async fn send_message(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Json<ContactResponse> {
    match state
        .mailer
        .send_contact(&payload.name, &payload.email, &payload.message)
        .await
    {
        Ok(()) => {
            info!("contact mail dispatched");
            Json(ContactResponse { status: "success" })
        }
        Err(e) => {
            // The reason stays in the logs; the caller only sees a flag.
            error!(error = %e, "contact mail failed");
            Json(ContactResponse { status: "fail" })
        }
    }
}
