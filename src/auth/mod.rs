use crate::state::AppState;
use axum::Router;

mod dto;
pub(crate) mod gate;
pub mod handlers;
mod password;
pub mod repo;
mod token;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::routes())
}
