use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::{matchers::any, Mock, ResponseTemplate};

use crate::helpers::{TestApp, TestSubscriber};

#[tokio::test]
async fn api_status_found_ok() -> Result<()> {
    let app = TestApp::spawn().await?;
    let subscriber = app.mount_subscriber().await;

    let res = app.get(&format!("/api/status/{}", subscriber.uuid)).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(
        body,
        json!({
            "found": true,
            "email": subscriber.email,
            "name": subscriber.name,
            "unsubscribed": false,
            "unsubscribedAt": null,
        })
    );

    Ok(())
}

#[tokio::test]
async fn api_status_reports_unsubscribed() -> Result<()> {
    let app = TestApp::spawn().await?;
    let subscriber = TestSubscriber::generate(5);
    let mut record = subscriber.to_record();
    record["abgemeldet"] = json!(true);
    record["abmeldedatum"] = json!("2024-05-01T10:00:00.000Z");
    app.mount_records(vec![record]).await;

    let body: Value = app
        .get(&format!("/api/status/{}", subscriber.uuid))
        .await?
        .error_for_status()?
        .json()
        .await?;

    assert_eq!(body["unsubscribed"], true);
    assert_eq!(body["unsubscribedAt"], "2024-05-01T10:00:00.000Z");

    Ok(())
}

#[tokio::test]
async fn api_status_not_found_404() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.mount_subscriber().await;

    let res = app.get("/api/status/no-such-subscriber").await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: Value = res.json().await?;
    assert_eq!(body["found"], false);

    Ok(())
}

#[tokio::test]
async fn api_status_store_failure_404() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.store_server)
        .await;

    let res = app.get("/api/status/abc").await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn api_status_record_beyond_first_page_404() -> Result<()> {
    let app = TestApp::spawn().await?;
    let subscribers = (1..=101).map(TestSubscriber::generate).collect::<Vec<_>>();
    // The store only hands out the first page of 100 records.
    let first_page = subscribers
        .iter()
        .take(100)
        .map(TestSubscriber::to_record)
        .collect();
    app.mount_records(first_page).await;

    let res = app
        .get(&format!("/api/status/{}", subscribers[99].uuid))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .get(&format!("/api/status/{}", subscribers[100].uuid))
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
