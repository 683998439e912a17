use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/stats", get(handlers::stats_page))
        .route("/mark", post(handlers::mark_form))
        .route("/api/day", get(handlers::get_day))
        .route("/api/mark", post(handlers::mark))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/ledger", get(handlers::get_ledger))
        .with_state(state)
}
