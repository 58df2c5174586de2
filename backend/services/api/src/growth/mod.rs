pub mod handlers;
pub mod requests;
pub mod responses;

use axum::routing::{get, put};
use axum::Router;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/{id}/growth-models",
            get(handlers::list_growth_models).post(handlers::create_growth_model),
        )
        .route(
            "/growth-models/{id}",
            get(handlers::get_growth_model).delete(handlers::delete_growth_model),
        )
        .route(
            "/growth-models/{id}/metrics",
            get(handlers::list_growth_metrics).post(handlers::create_growth_metric),
        )
        .route(
            "/growth-metrics/{id}",
            put(handlers::update_growth_metric).delete(handlers::delete_growth_metric),
        )
}
