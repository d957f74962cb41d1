//! Router construction for the lead capture server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::routes::{api, contact};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(contact::show_form))
        .route("/contact", post(contact::submit_form))
        .route("/api/leads", post(api::create_lead))
        .route("/api/lead-options", get(api::lead_options))
        .route("/api/health", get(api::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
