pub mod handlers;
pub mod requests;
pub mod responses;
pub mod service;
pub mod stream;

use axum::routing::{get, post, put};
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/{id}/metrics",
            get(handlers::list_metrics).post(handlers::create_metric),
        )
        .route(
            "/projects/{id}/metrics/refresh-status",
            post(handlers::refresh_statuses),
        )
        .route("/projects/{id}/metrics/events", get(stream::metric_events))
        .route("/metrics/evaluate", post(handlers::evaluate))
        .route(
            "/metrics/{id}",
            put(handlers::update_metric).delete(handlers::delete_metric),
        )
}
