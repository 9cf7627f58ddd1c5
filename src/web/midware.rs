use std::sync::Arc;

use axum::{
    http::{HeaderName, Method, Uri},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::web::{log, Error, REQUEST_ID_HEADER};

/// Turns a `web::Error` stored in the response extensions into the client facing response
/// and logs a `LogLine` for every request.
pub async fn response_mapper(req_method: Method, uri: Uri, resp: Response) -> Response {
    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let req_id_header = resp.headers().get(&x_request_id).cloned();
    let req_id = req_id_header
        .as_ref()
        .and_then(|id| id.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let web_error = resp.extensions().get::<Arc<Error>>().map(Arc::as_ref);
    let client_status_and_error = web_error.map(Error::status_code_and_client_error);

    let err_resp = client_status_and_error.as_ref().map(|(status, cl_err)| {
        let mut err_resp = (*status, Json(cl_err.body(&req_id))).into_response();
        if let Some(id) = &req_id_header {
            err_resp.headers_mut().insert(x_request_id.clone(), id.clone());
        }
        err_resp
    });

    log::log_request(
        &req_id,
        &req_method,
        &uri,
        resp.status(),
        web_error,
        client_status_and_error.as_ref(),
    );

    err_resp.unwrap_or(resp)
}
