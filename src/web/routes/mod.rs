//! Contains all the routes that this application can handle.

mod api;
mod health;
mod pages;

use crate::AppState;
use health::health_check;
use pages::{home, unsubscribe_fallback, unsubscribe_page};

use axum::{
    routing::{get, post},
    Router,
};

/// All the routes of the server
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/unsubscribe", get(unsubscribe_fallback))
        .route("/unsubscribe/{uuid}", get(unsubscribe_page))
        .with_state(app_state.clone())
        .nest("/api", api_routes(app_state))
        .route("/health", get(health_check))
}

/// API - Routes nested under "/api" path
fn api_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/unsubscribe", post(api::unsubscribe))
        .route("/status/{uuid}", get(api::status))
        .with_state(app_state)
        .route("/health", get(health_check))
}
