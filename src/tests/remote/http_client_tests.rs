use super::*;

#[test]
fn server_message_prefers_message_field() {
    let body = r#"{"message": "Reason is required", "error": "Bad Request"}"#;
    assert_eq!(
        extract_server_message(body).as_deref(),
        Some("Reason is required")
    );
}

#[test]
fn server_message_joins_message_lists() {
    let body = r#"{"message": ["limit must be positive", "reason should not be empty"]}"#;
    assert_eq!(
        extract_server_message(body).as_deref(),
        Some("limit must be positive; reason should not be empty")
    );
}

#[test]
fn server_message_falls_back_to_error_field() {
    assert_eq!(
        extract_server_message(r#"{"error": "not found"}"#).as_deref(),
        Some("not found")
    );
    assert_eq!(extract_server_message("<html>502</html>"), None);
    assert_eq!(extract_server_message(r#"{"status": 500}"#), None);
}

fn refused() -> anyhow::Error {
    // Port 9 (discard) is closed on test hosts.
    let err = reqwest::blocking::get("http://127.0.0.1:9/").unwrap_err();
    anyhow::Error::new(err).context("fetch request")
}

/// Serves `body` as a 200 JSON response to every request, counting them.
fn canned_server(body: &'static str) -> (String, std::sync::Arc<std::sync::atomic::AtomicUsize>) {
    use std::io::{Read, Write};
    use std::sync::atomic::{AtomicUsize, Ordering};

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = std::sync::Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => buf.extend_from_slice(&chunk[..n]),
                }
            }
            counter.fetch_add(1, Ordering::SeqCst);
            let resp = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = stream.write_all(resp.as_bytes());
        }
    });
    (format!("http://{}", addr), hits)
}

#[test]
fn api_errors_are_not_retried() {
    let mut calls = 0;
    let res: Result<()> = with_retries("fetch", || {
        calls += 1;
        Err(ApiError {
            label: "fetch".to_string(),
            status: 400,
            message: "bad".to_string(),
        }
        .into())
    });
    assert!(res.is_err());
    assert_eq!(calls, 1);
}

#[test]
fn local_errors_are_not_retried() {
    let mut calls = 0;
    let res: Result<()> = with_retries("fetch", || {
        calls += 1;
        anyhow::bail!("bad query")
    });
    assert!(res.is_err());
    assert_eq!(calls, 1);
}

#[test]
fn transport_errors_are_retried_then_succeed() {
    let mut calls = 0;
    let res = with_retries("fetch", || {
        calls += 1;
        if calls < 2 {
            return Err(refused());
        }
        Ok(calls)
    });
    assert_eq!(res.unwrap(), 2);
}

#[test]
fn undecodable_bodies_are_fetched_once() {
    let (base, hits) = canned_server("not json");
    let client = RemoteClient::new(&base, "t".to_string()).unwrap();
    let res: Result<serde_json::Value> = client.get_json("/platform/metrics", &[], "metrics");
    assert!(res.is_err());
    assert_eq!(hits.load(std::sync::atomic::Ordering::SeqCst), 1);
}
