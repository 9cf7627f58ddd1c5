//! A small web service that lets newsletter recipients unsubscribe through their personal link.
//! Subscribers live in an external record store, this service only looks them up and flags them.

pub mod app;
pub mod config;
mod error;
pub mod record_store;
pub mod templ_manager;
pub mod unsubscribe;
pub mod web;

pub use app::{App, AppState};
pub use error::{Error, Result};
pub use record_store::RecordStoreClient;

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Compact, human readable tracing used in debug builds and tests.
/// Defaults to the `debug` level unless `RUST_LOG` says otherwise.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .compact()
        .init();
}

/// Tracing for release builds, `info` level unless `RUST_LOG` says otherwise.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
