//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use lnbot::LnBot;
use serde_json::Value;
use wiremock::{MockServer, ResponseTemplate};

pub const API_KEY: &str = "key_test";

/// Mock API server plus a client pointed at it.
pub struct TestApi {
    pub server: MockServer,
    pub client: LnBot,
}

impl TestApi {
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(|builder| builder).await
    }

    pub async fn start_with(
        configure: impl FnOnce(lnbot::ClientBuilder) -> lnbot::ClientBuilder,
    ) -> anyhow::Result<Self> {
        let server = MockServer::start().await;
        let client = configure(
            LnBot::builder()
                .base_url(server.uri())
                .api_key(API_KEY)
                .timeout(Duration::from_secs(5)),
        )
        .build()?;
        Ok(Self { server, client })
    }
}

/// JSON response with the given status.
pub fn json(status: u16, body: Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(body)
}

/// Event-stream response with the given raw body.
pub fn sse(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/event-stream")
}

pub fn invoice(number: u64, status: &str) -> Value {
    serde_json::json!({
        "number": number,
        "status": status,
        "amount": 100,
        "bolt11": "lnbc1...",
        "createdAt": "2024-01-01T00:00:00Z"
    })
}

pub fn payment(number: u64, status: &str) -> Value {
    serde_json::json!({
        "number": number,
        "status": status,
        "amount": 50,
        "maxFee": 5,
        "address": "user@ln.bot"
    })
}

/// One named event frame.
pub fn frame(event: &str, data: &Value) -> String {
    format!("event: {}\ndata: {}\n\n", event, data)
}

/// Serve one event-stream connection that writes `chunks` with `gap` before
/// each, then closes. Returns the base URL.
pub fn trickle_server(chunks: Vec<String>, gap: Duration) -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;

    thread::spawn(move || -> std::io::Result<()> {
        let (mut conn, _) = listener.accept()?;
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = conn.read(&mut buf)?;
            if n == 0 {
                return Ok(());
            }
            request.extend_from_slice(&buf[..n]);
        }

        conn.write_all(
            b"HTTP/1.1 200 OK\r\ncontent-type: text/event-stream\r\nconnection: close\r\n\r\n",
        )?;
        conn.flush()?;
        for chunk in chunks {
            thread::sleep(gap);
            conn.write_all(chunk.as_bytes())?;
            conn.flush()?;
        }
        Ok(())
    });

    Ok(format!("http://{}", addr))
}
