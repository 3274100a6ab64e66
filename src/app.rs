use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/session", get(handlers::start_session))
        .route("/toggle", post(handlers::toggle))
        .route("/habits/add", post(handlers::add_habit))
        .route("/habits/delete", post(handlers::delete_habit))
        .route("/api/session", post(handlers::api_start_session))
        .route("/api/view", get(handlers::get_view))
        .route("/api/habits", get(handlers::list_habits).post(handlers::api_add_habit))
        .route("/api/habits/remove", post(handlers::api_remove_habit))
        .route("/api/completions", post(handlers::api_set_completion))
        .route("/api/logs", get(handlers::get_logs))
        .route("/api/summary", get(handlers::get_summary))
        .with_state(state)
}
