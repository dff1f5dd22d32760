//! One-shot HTTP responder for exercising the live clients offline.

use crate::config::AppConfig;
use reqwest::Client;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Request heads seen by the server, in arrival order
pub type Seen = Arc<Mutex<Vec<String>>>;

/// Serve `responses` to successive connections, one each, then stop listening.
pub async fn serve(responses: Vec<(u16, &'static str)>) -> (String, Seen) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();

    tokio::spawn(async move {
        for (status, body) in responses {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let head = read_request(&mut stream).await;
            log.lock().unwrap().push(head);

            let response = format!(
                "HTTP/1.1 {} {}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{}",
                status,
                reason(status),
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.expect("write response");
            let _ = stream.shutdown().await;
        }
    });

    (format!("http://{addr}"), seen)
}

/// Read one request, body included, and return its head.
async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 2048];
    loop {
        let n = stream.read(&mut chunk).await.expect("read request");
        if n == 0 {
            return String::from_utf8_lossy(&buf).into_owned();
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..end]).into_owned();
        let length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= end + 4 + length {
            return head;
        }
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        _ => "Status",
    }
}

/// Credentials set and both endpoints pointed at `base`.
pub fn config_for(base: &str) -> AppConfig {
    AppConfig {
        client_id: Some("client".to_string()),
        client_secret: Some("secret".to_string()),
        token_url: format!("{base}/token"),
        search_url: format!("{base}/search"),
        ..AppConfig::default()
    }
}

/// Client that ignores proxy settings from the environment.
pub fn direct_client() -> Client {
    Client::builder().no_proxy().build().expect("http client")
}
