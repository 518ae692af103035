use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/players", get(handlers::get_players))
        .route("/api/charts", get(handlers::get_charts))
        .route("/api/select", post(handlers::select))
        .route("/api/filter", post(handlers::filter))
        .with_state(state)
}
