//! HTTP client for the external record store holding the subscriber rows.
//!
//! Lookups only ever read the first page of the table (`offset=0`, `limit=page_size`),
//! a record outside of that window can not be found.

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

const TOKEN_HEADER: &str = "xc-token";

// ###################################
// ->   STRUCTS
// ###################################
#[derive(Debug)]
pub struct RecordStoreClient {
    http_client: Client,
    url: reqwest::Url,
    auth_token: SecretString,
    page_size: u32,
}

/// Row identifier assigned by the store, required for updates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

/// A subscriber row as returned by the store.
///
/// Only `Id` is required. Columns of an unexpected type are read as absent, the flag also
/// accepts the `0`/`1` some store backends return for checkbox columns.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriberRecord {
    #[serde(rename = "Id")]
    pub record_id: RecordId,
    /// Always a string, rows are only picked when their `uuid` matches.
    #[serde(rename = "uuid")]
    pub identifier: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(rename = "abgemeldet", default, deserialize_with = "lenient_flag")]
    unsubscribed: Option<bool>,
    #[serde(rename = "abmeldedatum", default, deserialize_with = "lenient_string")]
    pub unsubscribed_at: Option<String>,
}

impl SubscriberRecord {
    pub fn is_unsubscribed(&self) -> bool {
        self.unsubscribed.unwrap_or(false)
    }
}

fn lenient_string<'de, D>(deserializer: D) -> core::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_flag<'de, D>(deserializer: D) -> core::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::Number(n)) => n.as_f64().map(|n| n != 0.0),
        Some(Value::String(s)) => match s.to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// Returns the first record of `records` whose `uuid` equals `identifier`.
fn pick_record(records: Vec<Value>, identifier: &str) -> Result<Option<SubscriberRecord>> {
    records
        .into_iter()
        .find(|record| record.get("uuid").and_then(Value::as_str) == Some(identifier))
        .map(|record| {
            serde_json::from_value::<SubscriberRecord>(record)
                .map_err(|e| Error::Decode(e.to_string()))
        })
        .transpose()
}

#[derive(Deserialize)]
struct RecordPage {
    #[serde(default)]
    list: Vec<Value>,
}

#[derive(Serialize)]
struct UnsubscribePatch<'a> {
    #[serde(rename = "Id")]
    record_id: &'a RecordId,
    abgemeldet: bool,
    abmeldedatum: String,
}

// ###################################
// ->   IMPLS
// ###################################
impl RecordStoreClient {
    pub fn new<S: AsRef<str>>(
        url: S,
        auth_token: SecretString,
        timeout: std::time::Duration,
        page_size: u32,
    ) -> Result<Self> {
        let url =
            reqwest::Url::parse(url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(RecordStoreClient {
            http_client,
            url,
            auth_token,
            page_size,
        })
    }

    /// Fetches a single page of records and returns the first one whose `uuid` matches `identifier`.
    pub async fn find_by_identifier(&self, identifier: &str) -> Result<Option<SubscriberRecord>> {
        let resp = self
            .http_client
            .get(self.url.clone())
            .header(TOKEN_HEADER, self.auth_token.expose_secret())
            .query(&[("offset", 0), ("limit", self.page_size)])
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Error::UnexpectedStatus(status));
        }

        let page: RecordPage = resp.json().await?;
        debug!("record store returned {} records", page.list.len());

        pick_record(page.list, identifier)
    }

    /// Flags the record as unsubscribed and stamps it with `at`.
    /// Only a `200 OK` from the store counts as success.
    pub async fn mark_unsubscribed(&self, record_id: &RecordId, at: DateTime<Utc>) -> Result<()> {
        let patch = UnsubscribePatch {
            record_id,
            abgemeldet: true,
            abmeldedatum: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        let resp = self
            .http_client
            .patch(self.url.clone())
            .header(TOKEN_HEADER, self.auth_token.expose_secret())
            .json(&patch)
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Error::UnexpectedStatus(status));
        }

        Ok(())
    }
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid record store url: {0}")]
    UrlParsing(String),
    #[error("record store request timed out")]
    Timeout,
    #[error("failed to connect to the record store: {0}")]
    Connect(String),
    #[error("failed to decode the record store response: {0}")]
    Decode(String),
    #[error("record store responded with status: {0}")]
    UnexpectedStatus(StatusCode),

    #[error("record store request failed: {0}")]
    Request(reqwest::Error),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Error::Timeout
        } else if value.is_connect() {
            Error::Connect(value.to_string())
        } else if value.is_decode() {
            Error::Decode(value.to_string())
        } else {
            Error::Request(value)
        }
    }
}
