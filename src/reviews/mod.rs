use crate::config::AppConfig;
use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod repo;

pub fn router(config: &AppConfig) -> Router<AppState> {
    Router::new().merge(handlers::routes(config.reviews_require_auth))
}
