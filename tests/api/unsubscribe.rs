use std::time::Duration;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::{
    matchers::{any, body_partial_json, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::TestApp;

#[tokio::test]
async fn api_unsubscribe_ok() -> Result<()> {
    let app = TestApp::spawn().await?;
    let subscriber = app.mount_subscriber().await;

    Mock::given(method("PATCH"))
        .and(path("/records"))
        .and(body_partial_json(json!({ "Id": subscriber.id, "abgemeldet": true })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.store_server)
        .await;

    let res = app
        .post_unsubscribe_json(&json!({ "uuid": subscriber.uuid }))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": format!("successfully unsubscribed: {}", subscriber.email),
        })
    );

    Ok(())
}

#[tokio::test]
async fn api_unsubscribe_sends_a_timestamp() -> Result<()> {
    let app = TestApp::spawn().await?;
    let subscriber = app.mount_subscriber().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.store_server)
        .await;

    app.post_unsubscribe_json(&json!({ "uuid": subscriber.uuid }))
        .await?
        .error_for_status()?;

    let requests = app
        .store_server
        .received_requests()
        .await
        .unwrap_or_default();
    let patch = requests
        .iter()
        .find(|req| req.method.as_str() == "PATCH")
        .map(|req| serde_json::from_slice::<Value>(&req.body))
        .transpose()?
        .unwrap_or_default();

    assert!(
        patch["abmeldedatum"]
            .as_str()
            .is_some_and(|ts| chrono::DateTime::parse_from_rfc3339(ts).is_ok()),
        "expected an RFC 3339 timestamp, got: {patch}"
    );

    Ok(())
}

#[tokio::test]
async fn api_unsubscribe_twice_ok() -> Result<()> {
    let app = TestApp::spawn().await?;
    let subscriber = app.mount_subscriber().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.store_server)
        .await;

    for _ in 0..2 {
        let res = app
            .post_unsubscribe_json(&json!({ "uuid": subscriber.uuid }))
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
    }

    Ok(())
}

#[tokio::test]
async fn api_unsubscribe_missing_identifier_400() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.store_server)
        .await;

    let cases = [
        ("{}", "Empty json"),
        (r#"{"uuid": ""}"#, "Empty uuid"),
        (r#"{"uuid": null}"#, "Null uuid"),
        (r#"{"email": "jd@example.com"}"#, "Other fields only"),
        ("", "Empty body"),
        ("not json", "Invalid json"),
    ];

    for (body, description) in cases {
        let res = app.post_unsubscribe(body).await?;
        assert_eq!(
            res.status(),
            StatusCode::BAD_REQUEST,
            "Wrong response StatusCode for: {description}"
        );

        let body: Value = res.json().await?;
        assert_eq!(
            body,
            json!({ "success": false, "error": "missing identifier" }),
            "Wrong body for: {description}"
        );
    }

    Ok(())
}

#[tokio::test]
async fn api_unsubscribe_unknown_subscriber_400() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.mount_subscriber().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.store_server)
        .await;

    let res = app
        .post_unsubscribe_json(&json!({ "uuid": "no-such-subscriber" }))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = res.json().await?;
    assert_eq!(
        body,
        json!({ "success": false, "message": "subscriber not found" })
    );

    Ok(())
}

#[tokio::test]
async fn api_unsubscribe_store_rejects_update_400() -> Result<()> {
    let app = TestApp::spawn().await?;
    let subscriber = app.mount_subscriber().await;

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.store_server)
        .await;

    let res = app
        .post_unsubscribe_json(&json!({ "uuid": subscriber.uuid }))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = res.json().await?;
    assert_eq!(
        body,
        json!({ "success": false, "message": "store error: 500" })
    );

    Ok(())
}

#[tokio::test]
async fn api_unsubscribe_store_lookup_times_out_400() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "list": [] }))
                .set_delay(Duration::from_secs(180)),
        )
        .mount(&app.store_server)
        .await;

    let res = app
        .post_unsubscribe_json(&json!({ "uuid": "abc" }))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = res.json().await?;
    assert_eq!(body["message"], "subscriber not found");

    Ok(())
}
