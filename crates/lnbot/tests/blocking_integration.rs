//! Blocking client integration tests.
//!
//! The blocking client runs on `spawn_blocking` threads while the mock server
//! lives on the test runtime.

#![cfg(feature = "blocking")]

mod common;

use std::time::Duration;

use anyhow::Result;
use common::{frame, invoice, json, trickle_server, API_KEY};
use lnbot::{CreateInvoiceRequest, InvoiceStatus, ListQuery};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer};

/// Build inside the blocking closure; the blocking client must not be created
/// or dropped on a runtime thread.
fn client(base_url: &str) -> lnbot::Result<lnbot::blocking::LnBot> {
    lnbot::blocking::LnBot::builder()
        .base_url(base_url)
        .api_key(API_KEY)
        .build_blocking()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blocking_wallet_current() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/wallets/current"))
        .and(header("authorization", "Bearer key_test"))
        .respond_with(json(
            200,
            json!({"walletId": "wal_1", "name": "Test", "balance": 1000, "onHold": 50, "available": 950}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let wallet = tokio::task::spawn_blocking(move || client(&uri)?.wallets().current()).await??;
    assert_eq!(wallet.on_hold, 50);
    assert_eq!(wallet.available, 950);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blocking_create_and_list() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/invoices"))
        .and(body_json(json!({"amount": 100, "memo": "coffee"})))
        .respond_with(json(200, invoice(1, "pending")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/invoices"))
        .and(query_param("limit", "1"))
        .respond_with(json(200, json!([invoice(1, "pending")])))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let (created, listed) = tokio::task::spawn_blocking(move || -> lnbot::Result<_> {
        let client = client(&uri)?;
        let created = client
            .invoices()
            .create(CreateInvoiceRequest::new(100).with_memo("coffee"))?;
        let listed = client.invoices().list(ListQuery::default().limit(1))?;
        Ok((created, listed))
    })
    .await??;

    assert_eq!(created.number, 1);
    assert_eq!(listed.len(), 1);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blocking_errors_match_async() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/invoices/9"))
        .respond_with(json(404, json!({"message": "no such invoice"})))
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = tokio::task::spawn_blocking(move || client(&uri)?.invoices().get(9))
        .await?
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.message(), Some("no such invoice"));

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blocking_watch_iterates_events() -> Result<()> {
    let server = MockServer::start().await;

    let body = format!(
        "{}{}",
        frame("pending", &invoice(1, "pending")),
        frame("settled", &invoice(1, "settled"))
    );
    Mock::given(method("GET"))
        .and(path("/v1/invoices/1/events"))
        .and(header("accept", "text/event-stream"))
        .and(query_param("timeout", "30"))
        .respond_with(common::sse(&body))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let events = tokio::task::spawn_blocking(move || -> lnbot::Result<Vec<_>> {
        client(&uri)?.invoices().watch(1, Some(30))?.collect()
    })
    .await??;

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event, "pending");
    assert_eq!(events[1].data.status, InvoiceStatus::Settled);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blocking_stream_error_before_events() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/events"))
        .respond_with(json(401, json!({"message": "invalid api key"})))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || client(&uri)?.events().stream().map(|_| ())).await?;
    let err = result.unwrap_err();
    assert!(err.is_auth_error());

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blocking_slow_stream_outlives_stream_timeout() -> Result<()> {
    let chunks = vec![
        frame("pending", &invoice(1, "pending")),
        ": keepalive\n".to_string(),
        ": keepalive\n".to_string(),
        frame("settled", &invoice(1, "settled")),
    ];
    let base_url = trickle_server(chunks, Duration::from_millis(150))?;

    let events = tokio::task::spawn_blocking(move || -> lnbot::Result<Vec<_>> {
        lnbot::blocking::LnBot::builder()
            .base_url(base_url)
            .api_key(API_KEY)
            .stream_timeout(Duration::from_millis(500))
            .build_blocking()?
            .invoices()
            .watch(1, None)?
            .collect()
    })
    .await??;

    assert_eq!(events.len(), 2);
    assert_eq!(events[1].data.status, InvoiceStatus::Settled);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blocking_silent_stream_times_out() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/events"))
        .respond_with(common::sse("").set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        lnbot::blocking::LnBot::builder()
            .base_url(uri)
            .api_key(API_KEY)
            .stream_timeout(Duration::from_millis(200))
            .build_blocking()?
            .events()
            .stream()
            .map(|_| ())
    })
    .await?;
    let err = result.unwrap_err();
    assert!(err.is_timeout());

    Ok(())
}
