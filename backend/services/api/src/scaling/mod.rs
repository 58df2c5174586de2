pub mod handlers;
pub mod requests;
pub mod responses;

use axum::routing::{get, put};
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/{id}/scaling-metrics",
            get(handlers::list_scaling_metrics).post(handlers::create_scaling_metric),
        )
        .route(
            "/scaling-metrics/{id}",
            put(handlers::update_scaling_metric).delete(handlers::delete_scaling_metric),
        )
}
