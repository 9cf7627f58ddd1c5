use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use std::sync::Arc;
use strum_macros::AsRefStr;

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("the request did not contain a subscriber identifier")]
    MissingIdentifier,

    #[error("templating error: {0}")]
    Tera(#[from] tera::Error),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        match self {
            Error::MissingIdentifier => (StatusCode::BAD_REQUEST, ClientError::MissingIdentifier),
            Error::Tera(_) => (StatusCode::INTERNAL_SERVER_ERROR, ClientError::ServiceError),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

#[derive(Debug, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("missing identifier")]
    MissingIdentifier,
    #[display("Service Error!")]
    ServiceError,
}

impl ClientError {
    /// The JSON body sent to the client.
    /// Validation errors keep the `{success, error}` shape of the unsubscribe API.
    pub fn body(&self, req_id: &str) -> Value {
        match self {
            ClientError::MissingIdentifier => json!({
                "success": false,
                "error": self.to_string(),
            }),
            ClientError::ServiceError => json!({
                "error": {
                    "message": self.to_string(),
                    "data": {
                        "req_id": req_id,
                    }
                }
            }),
        }
    }
}
