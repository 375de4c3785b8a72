#![allow(clippy::expect_used)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use sentinel::domain::entities::alert::AlertCondition;
use sentinel::domain::ports::notifier::{Notifier, NotifyError};
use sentinel::domain::ports::transport::{MessageTransport, TransportError};
use sentinel::domain::value_objects::credentials::Credentials;
use sentinel::infrastructure::notifications::http_transport::ReqwestTransport;
use sentinel::infrastructure::notifications::telegram::{TelegramNotifier, format_timestamp};

// ---------------------------------------------------------------------------
// RecordingTransport
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct RecordingTransport {
    calls: Arc<Mutex<Vec<(String, Value)>>>,
}

#[async_trait]
impl MessageTransport for RecordingTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<(), TransportError> {
        self.calls
            .lock()
            .expect("lock")
            .push((url.to_owned(), body.clone()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// One-shot HTTP server
// ---------------------------------------------------------------------------

struct Captured {
    head: String,
    body: String,
}

/// Accepts one connection, answers with `status_line` (or never answers when
/// `None`) and hands back what the client sent.
async fn serve_once(
    status_line: Option<&'static str>,
) -> (String, tokio::task::JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let base = format!("http://{}", listener.local_addr().expect("addr"));

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let (head, body) = loop {
            let n = socket.read(&mut chunk).await.expect("read");
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(split) = text.find("\r\n\r\n") {
                let head = text[..split].to_string();
                let length = head
                    .lines()
                    .find_map(|l| {
                        l.to_ascii_lowercase()
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().expect("length"))
                    })
                    .unwrap_or(0);
                let body = &buf[split + 4..];
                if body.len() >= length || n == 0 {
                    break (head, String::from_utf8_lossy(body).to_string());
                }
            }
            assert!(n > 0, "client closed before sending a full request");
        };

        match status_line {
            Some(status) => {
                let response = format!("{status}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
                socket.write_all(response.as_bytes()).await.expect("write");
            }
            None => tokio::time::sleep(Duration::from_secs(5)).await,
        }
        Captured { head, body }
    });

    (base, handle)
}

fn condition() -> AlertCondition {
    let at = Utc
        .with_ymd_and_hms(2025, 12, 18, 20, 30, 5)
        .single()
        .expect("valid date");
    AlertCondition::from_lines(
        at,
        vec![
            "🔥 CPU en surchauffe : 91.0%".into(),
            "🧠 RAM saturée : 87.5%".into(),
        ],
    )
    .expect("two lines")
}

fn credentials() -> Option<Credentials> {
    Credentials::from_parts(Some("123456:ABC-token"), Some("987654"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_credentials_never_touch_the_transport() {
    let transport = RecordingTransport::default();
    let notifier = TelegramNotifier::new(None, Box::new(transport.clone()), "https://api.telegram.org");

    let result = notifier.send(&condition()).await;

    assert_eq!(result, Err(NotifyError::NotConfigured));
    assert!(transport.calls.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn message_carries_banner_timestamp_and_lines() {
    let transport = RecordingTransport::default();
    let notifier = TelegramNotifier::new(
        credentials(),
        Box::new(transport.clone()),
        "https://api.telegram.org",
    );

    notifier.send(&condition()).await.expect("sent");

    let calls = transport.calls.lock().expect("lock");
    let (url, body) = &calls[0];
    assert_eq!(url, "https://api.telegram.org/bot123456:ABC-token/sendMessage");
    assert_eq!(body["chat_id"], "987654");

    let text = body["text"].as_str().expect("text field");
    let expected_header = format!(
        "🚨 **ALERTE SENTINEL** [{}] 🚨\n\n",
        format_timestamp(condition().detected_at)
    );
    assert!(text.starts_with(&expected_header), "got: {text}");
    assert!(text.contains("🔥 CPU en surchauffe : 91.0%\n🧠 RAM saturée : 87.5%"));
}

#[tokio::test]
async fn posts_json_over_http() {
    let (base, server) = serve_once(Some("HTTP/1.1 200 OK")).await;
    let transport = ReqwestTransport::new(Duration::from_secs(5)).expect("client");
    let notifier = TelegramNotifier::new(credentials(), Box::new(transport), base);

    notifier.send(&condition()).await.expect("delivered");

    let captured = server.await.expect("server task");
    assert!(captured.head.starts_with("POST /bot123456:ABC-token/sendMessage HTTP/1.1"));
    assert!(
        captured
            .head
            .to_ascii_lowercase()
            .contains("content-type: application/json")
    );
    let body: Value = serde_json::from_str(&captured.body).expect("json body");
    assert_eq!(body["chat_id"], "987654");
    assert!(
        body["text"]
            .as_str()
            .expect("text")
            .contains("ALERTE SENTINEL")
    );
}

#[tokio::test]
async fn non_success_status_is_delivery_failure() {
    let (base, _server) = serve_once(Some("HTTP/1.1 500 Internal Server Error")).await;
    let transport = ReqwestTransport::new(Duration::from_secs(5)).expect("client");
    let notifier = TelegramNotifier::new(credentials(), Box::new(transport), base);

    let result = notifier.send(&condition()).await;

    assert_eq!(result, Err(NotifyError::DeliveryFailed("HTTP 500".into())));
}

#[tokio::test]
async fn silent_server_times_out_without_leaking_token() {
    let (base, _server) = serve_once(None).await;
    let transport = ReqwestTransport::new(Duration::from_millis(300)).expect("client");
    let notifier = TelegramNotifier::new(credentials(), Box::new(transport), base);

    let started = std::time::Instant::now();
    let err = notifier.send(&condition()).await.expect_err("timeout");

    assert!(started.elapsed() < Duration::from_secs(3));
    match err {
        NotifyError::DeliveryFailed(reason) => {
            assert!(reason.contains("timed out"), "got: {reason}");
            assert!(!reason.contains("ABC-token"));
        }
        NotifyError::NotConfigured => panic!("credentials were provided"),
    }
}
