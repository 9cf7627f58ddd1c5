use axum::{
    extract::{Path, State},
    response::Html,
};
use tera::Context;

use crate::{unsubscribe::find_subscriber, web::WebResult, AppState};

#[tracing::instrument(name = "home", skip(app_state))]
pub async fn home(State(app_state): State<AppState>) -> WebResult<Html<String>> {
    let body = app_state
        .templ_mgr
        .render_html_to_string(&Context::new(), "home.html")?;

    Ok(Html(body))
}

/// Landing page for unsubscribe links that lost their identifier.
#[tracing::instrument(name = "unsubscribe_fallback", skip(app_state))]
pub async fn unsubscribe_fallback(State(app_state): State<AppState>) -> WebResult<Html<String>> {
    let body = app_state
        .templ_mgr
        .render_html_to_string(&Context::new(), "unsubscribe_fallback.html")?;

    Ok(Html(body))
}

/// Renders the unsubscribe page, pre-filled when the subscriber could be found.
/// An unknown identifier still renders the page, in its empty state.
#[tracing::instrument(name = "unsubscribe_page", skip(app_state))]
pub async fn unsubscribe_page(
    State(app_state): State<AppState>,
    Path(uuid): Path<String>,
) -> WebResult<Html<String>> {
    let subscriber = find_subscriber(&app_state.store_client, &uuid).await;

    let mut ctx = Context::new();
    ctx.insert("uuid", &uuid);
    ctx.insert("found", &subscriber.is_some());
    ctx.insert(
        "email",
        subscriber
            .as_ref()
            .and_then(|s| s.email.as_deref())
            .unwrap_or_default(),
    );
    ctx.insert(
        "name",
        subscriber
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .unwrap_or_default(),
    );
    ctx.insert(
        "unsubscribed",
        &subscriber.as_ref().is_some_and(|s| s.is_unsubscribed()),
    );

    let body = app_state
        .templ_mgr
        .render_html_to_string(&ctx, "unsubscribe.html")?;

    Ok(Html(body))
}
