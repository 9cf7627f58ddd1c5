//! The unsubscribe workflow: look a subscriber up by its identifier, then flag the record.
//!
//! Every outcome is resolved to an `UnsubscribeOutcome`, store failures never leave this module.
//! There is no guard against repeated or concurrent calls for the same identifier,
//! each call re-issues the same update.

use chrono::Utc;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::record_store::{self, RecordStoreClient, SubscriberRecord};

pub const NOT_FOUND_MSG: &str = "subscriber not found";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsubscribeOutcome {
    pub success: bool,
    pub message: String,
}

impl UnsubscribeOutcome {
    fn success(message: String) -> Self {
        Self {
            success: true,
            message,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Best-effort lookup, any store failure is logged and treated as an absent subscriber.
#[tracing::instrument(name = "Looking up subscriber", skip(store))]
pub async fn find_subscriber(store: &RecordStoreClient, identifier: &str) -> Option<SubscriberRecord> {
    match store.find_by_identifier(identifier).await {
        Ok(record) => record,
        Err(e) => {
            warn!(error = %e, "subscriber lookup failed");
            None
        }
    }
}

#[tracing::instrument(name = "Unsubscribing subscriber", skip(store))]
pub async fn unsubscribe(store: &RecordStoreClient, identifier: &str) -> UnsubscribeOutcome {
    let Some(subscriber) = find_subscriber(store, identifier).await else {
        return UnsubscribeOutcome::failure(NOT_FOUND_MSG);
    };

    let email = subscriber.email.as_deref().unwrap_or("unknown");

    match store
        .mark_unsubscribed(&subscriber.record_id, Utc::now())
        .await
    {
        Ok(()) => {
            info!(email, identifier, "subscriber unsubscribed");
            UnsubscribeOutcome::success(format!("successfully unsubscribed: {email}"))
        }
        Err(record_store::Error::UnexpectedStatus(status)) => {
            warn!(%status, "record store rejected the update");
            UnsubscribeOutcome::failure(format!("store error: {}", status.as_u16()))
        }
        Err(e) => {
            error!(error = ?e, "failed to update the subscriber record");
            UnsubscribeOutcome::failure(e.to_string())
        }
    }
}
