mod error;
mod log;
pub mod midware;
pub mod routes;
pub mod types;

pub use error::{ClientError, Error, WebResult};

pub const REQUEST_ID_HEADER: &str = "x-request-id";
/// Reported by the health check.
pub const SERVICE_NAME: &str = "unsubscribe-service";
