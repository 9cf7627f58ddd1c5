use std::time::Duration;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, Request, Response},
    middleware, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{MakeSpan, OnRequest, OnResponse, TraceLayer},
};
use tracing::{info, Span};

use crate::{
    web::{midware, routes::routes, REQUEST_ID_HEADER, SERVICE_NAME},
    App,
};

pub type ServeResult<T> = core::result::Result<T, ServeError>;

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("io error while serving: {0}")]
    Io(#[from] std::io::Error),
}

/// The core async function returning a future that will serve this application
/// until a shutdown signal is received.
///
/// Accepts an `App` and sets up a TraceLayer that provides console logging.
pub async fn serve(app: App) -> ServeResult<()> {
    let App {
        app_state,
        listener,
    } = app;
    let x_request_id: HeaderName = HeaderName::from_static(REQUEST_ID_HEADER);

    let trace_layer = build_trace_layer();

    let app = Router::new().merge(routes(app_state)).layer(
        ServiceBuilder::new()
            // Set UUID per request
            .layer(SetRequestIdLayer::new(
                x_request_id.clone(),
                MakeRequestUuid,
            ))
            .layer(trace_layer)
            // The response travels the stack bottom-up, so the mapper sees the propagated
            // request id header.
            .layer(middleware::map_response(midware::response_mapper))
            // Propagate UUID to response, keep it last so it processes the response first!
            .layer(PropagateRequestIdLayer::new(x_request_id)),
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// A helper function that sets up the `tower_http::TraceLayer` - tracing configuration.
///
/// Spans carry the matched route template instead of the raw path,
/// subscriber identifiers in `/unsubscribe/{uuid}` and `/api/status/{uuid}` stay out of the logs.
fn build_trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl MakeSpan<Body> + Clone,
    impl OnRequest<Body> + Clone,
    impl OnResponse<Body> + Clone,
> {
    TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            let req_id = req
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|id| id.to_str().ok())
                .unwrap_or_default();
            let route = req
                .extensions()
                .get::<MatchedPath>()
                .map(MatchedPath::as_str)
                .unwrap_or("<unmatched>");

            tracing::error_span!(
                "serve",
                service = SERVICE_NAME,
                req_id,
                method = %req.method(),
                route
            )
        })
        .on_request(|_req: &Request<Body>, _s: &Span| tracing::info!("START"))
        .on_response(|res: &Response<Body>, latency: Duration, _s: &Span| {
            let status = res.status();

            if status.is_server_error() {
                tracing::error!("END in: {:?} - STATUS: {}", latency, status.as_u16())
            } else if status.is_client_error() {
                tracing::warn!("END in: {:?} - STATUS: {}", latency, status.as_u16())
            } else {
                tracing::info!("END in: {:?} - STATUS: {}", latency, status.as_u16())
            }
        })
}

/// Resolves on Ctrl-C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("{:<20} - shutting down", "shutdown signal");
}
