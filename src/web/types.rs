//! Request and response bodies of the JSON API.

use serde::Serialize;
use serde_json::Value;

use crate::record_store::SubscriberRecord;

// ###################################
// ->   STRUCTS
// ###################################
/// Body of `POST /api/unsubscribe`.
#[derive(Debug)]
pub struct UnsubscribeRequest {
    pub uuid: String,
}

/// Body of a successful `GET /api/status/{uuid}`.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberStatus {
    pub found: bool,
    pub email: String,
    pub name: String,
    pub unsubscribed: bool,
    pub unsubscribed_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: String,
}

// ###################################
// ->   IMPLS
// ###################################
impl UnsubscribeRequest {
    /// Reads the identifier from a raw request body.
    /// Bodies that are not a JSON object, and a `uuid` that is absent, not a string or empty,
    /// all count as a missing identifier.
    pub fn parse(body: &[u8]) -> Option<Self> {
        let body: Value = serde_json::from_slice(body).ok()?;
        let uuid = body.get("uuid")?.as_str()?;

        if uuid.is_empty() {
            return None;
        }

        Some(UnsubscribeRequest {
            uuid: uuid.to_string(),
        })
    }
}

impl From<SubscriberRecord> for SubscriberStatus {
    fn from(record: SubscriberRecord) -> Self {
        let unsubscribed = record.is_unsubscribed();
        SubscriberStatus {
            found: true,
            email: record.email.unwrap_or_default(),
            name: record.name.unwrap_or_default(),
            unsubscribed,
            unsubscribed_at: record.unsubscribed_at,
        }
    }
}
