use axum::{body::Bytes, extract::State, http::StatusCode, Json};

use crate::{
    unsubscribe::{self as workflow, UnsubscribeOutcome},
    web::{self, types::UnsubscribeRequest, WebResult},
    AppState,
};

/// Runs the unsubscribe workflow: `200` on success, `400` on any failure.
/// A body without an identifier is rejected before the record store is contacted.
#[tracing::instrument(name = "api_unsubscribe", skip_all)]
pub async fn unsubscribe(
    State(app_state): State<AppState>,
    body: Bytes,
) -> WebResult<(StatusCode, Json<UnsubscribeOutcome>)> {
    let req = UnsubscribeRequest::parse(&body).ok_or(web::Error::MissingIdentifier)?;

    let outcome = workflow::unsubscribe(&app_state.store_client, &req.uuid).await;
    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    Ok((status, Json(outcome)))
}
