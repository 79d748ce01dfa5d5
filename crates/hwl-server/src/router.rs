use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with every hospital worklist endpoint.
pub fn build_router(state: AppState) -> Router {
    let entry = "/api/hospital/:hospitalId/employeelist/:entryId";

    Router::new()
        .route("/health", get(handler::health_handler))
        .route("/info", get(handler::info_handler))
        .route(
            "/api/hospital",
            get(handler::list_hospitals).post(handler::create_hospital),
        )
        .route(
            "/api/hospital/:hospitalId",
            get(handler::get_hospital).delete(handler::delete_hospital),
        )
        .route("/api/hospital/:hospitalId/role", get(handler::list_roles))
        .route(
            "/api/hospital/:hospitalId/employeelist",
            get(handler::list_entries).post(handler::create_entry),
        )
        .route(
            entry,
            get(handler::get_entry)
                .put(handler::update_entry)
                .delete(handler::delete_entry),
        )
        .route(
            &format!("{entry}/transfer"),
            post(handler::transfer_entry),
        )
        .route(
            &format!("{entry}/performance"),
            get(handler::list_performances).post(handler::create_performance),
        )
        .route(
            &format!("{entry}/performance/:performanceId"),
            get(handler::get_performance)
                .put(handler::update_performance)
                .delete(handler::delete_performance),
        )
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([header::ORIGIN, header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(12 * 60 * 60))
}
