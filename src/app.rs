use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/settings", post(handlers::submit_settings))
        .route("/api/state", get(handlers::get_state))
        .route("/api/toggle", post(handlers::toggle))
        .route("/api/settings", post(handlers::update_settings))
        .with_state(state)
}
