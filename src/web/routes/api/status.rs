use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{
    unsubscribe::{find_subscriber, NOT_FOUND_MSG},
    web::types::SubscriberStatus,
    AppState,
};

#[tracing::instrument(name = "api_status", skip(app_state))]
pub async fn status(State(app_state): State<AppState>, Path(uuid): Path<String>) -> Response {
    match find_subscriber(&app_state.store_client, &uuid).await {
        Some(subscriber) => Json(SubscriberStatus::from(subscriber)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "found": false,
                "error": NOT_FOUND_MSG,
            })),
        )
            .into_response(),
    }
}
