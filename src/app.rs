use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/records", post(handlers::submit_record))
        .route("/records/:id/delete", post(handlers::submit_delete))
        .route(
            "/api/records",
            get(handlers::list_records).post(handlers::add_record),
        )
        .route("/api/records/:id", delete(handlers::delete_record))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/report", get(handlers::get_report))
        .with_state(state)
}
