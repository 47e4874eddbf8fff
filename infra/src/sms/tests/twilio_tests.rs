use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use otp_core::services::Notifier;

use crate::sms::{TwilioConfig, TwilioNotifier};

fn config() -> TwilioConfig {
    TwilioConfig {
        account_sid: Some("ACtest".to_string()),
        auth_token: Some("test_token".to_string()),
        from_number: Some("+15551234567".to_string()),
        max_retries: 2,
        retry_delay_ms: 1,
        request_timeout_secs: 5,
        // Nothing listens on port 1
        api_base_url: "http://127.0.0.1:1".to_string(),
        code_ttl_seconds: 300,
    }
}

#[test]
fn test_message_body() {
    let notifier = TwilioNotifier::new(config()).unwrap();
    assert_eq!(
        notifier.message_body("482913"),
        "Your verification code is: 482913. This code will expire in 5 minutes."
    );
}

#[tokio::test]
async fn test_missing_credentials_logs_instead_of_sending() {
    let mut config = config();
    config.account_sid = None;
    config.auth_token = None;

    let notifier = TwilioNotifier::new(config).unwrap();
    let message_id = notifier.deliver("+919812345678", "482913").await.unwrap();
    assert!(message_id.starts_with("logged_"));
}

#[tokio::test]
async fn test_missing_auth_token_alone_triggers_fallback() {
    let mut config = config();
    config.auth_token = None;

    let notifier = TwilioNotifier::new(config).unwrap();
    assert!(notifier.deliver("+919812345678", "482913").await.unwrap().starts_with("logged_"));
}

#[tokio::test]
async fn test_unreachable_gateway_fails_after_retries() {
    let notifier = TwilioNotifier::new(config()).unwrap();

    let error = notifier.deliver("+919812345678", "482913").await.unwrap_err();
    assert!(error.contains("after 2 attempts"));
}

#[tokio::test]
async fn test_missing_from_number_is_delivery_error() {
    let mut config = config();
    config.from_number = None;

    let notifier = TwilioNotifier::new(config).unwrap();
    assert!(notifier.deliver("+919812345678", "482913").await.is_err());
}

#[test]
fn test_non_e164_from_number_rejected() {
    let mut config = config();
    config.from_number = Some("15551234567".to_string());
    assert!(TwilioNotifier::new(config).is_err());
}

/// Local stand-in for the Twilio API
///
/// Answers each request with the next canned `(status, body)` pair, repeating
/// the last one, and records the raw requests it received.
struct StubGateway {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubGateway {
    async fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let received = requests.clone();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let raw = read_request(&mut socket).await;
                let index = {
                    let mut received = received.lock().unwrap();
                    received.push(raw);
                    received.len() - 1
                };
                let (status, body) = responses[index.min(responses.len() - 1)];
                let response = format!(
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self { base_url, requests }
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn last_request(&self) -> String {
        self.requests.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

/// Read one HTTP request: headers, then `Content-Length` bytes of body
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn stub_config(gateway: &StubGateway, max_retries: u32) -> TwilioConfig {
    TwilioConfig {
        max_retries,
        api_base_url: gateway.base_url.clone(),
        ..config()
    }
}

#[tokio::test]
async fn test_server_errors_are_retried_until_success() {
    let gateway = StubGateway::start(vec![
        (503, r#"{"message":"unavailable"}"#),
        (503, r#"{"message":"unavailable"}"#),
        (201, r#"{"sid":"SM0123456789","status":"queued"}"#),
    ])
    .await;
    let notifier = TwilioNotifier::new(stub_config(&gateway, 3)).unwrap();

    let message_id = notifier.deliver("+919812345678", "482913").await.unwrap();

    assert_eq!(message_id, "SM0123456789");
    assert_eq!(gateway.request_count(), 3);

    let request = gateway.last_request();
    assert!(request.starts_with("POST /2010-04-01/Accounts/ACtest/Messages.json"));
    assert!(request.to_lowercase().contains("authorization: basic "));
    assert!(request.contains("To=%2B919812345678"));
    assert!(request.contains("482913"));
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let gateway = StubGateway::start(vec![(400, r#"{"code":21211,"message":"Invalid 'To'"}"#)]).await;
    let notifier = TwilioNotifier::new(stub_config(&gateway, 3)).unwrap();

    let error = notifier.deliver("+919812345678", "482913").await.unwrap_err();

    assert!(error.contains("Invalid request"));
    assert_eq!(gateway.request_count(), 1);
}

#[tokio::test]
async fn test_rate_limiting_exhausts_retries() {
    let gateway = StubGateway::start(vec![(429, r#"{"message":"Too Many Requests"}"#)]).await;
    let notifier = TwilioNotifier::new(stub_config(&gateway, 3)).unwrap();

    let error = notifier.deliver("+919812345678", "482913").await.unwrap_err();

    assert!(error.contains("after 3 attempts"));
    assert_eq!(gateway.request_count(), 3);
}
