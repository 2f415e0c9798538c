//! Minimal liveness endpoint for hosting platforms that probe an HTTP port.
//!
//! Answers `200 OK` to GET and HEAD and closes anything else. Carries no
//! application data; only started when a port is configured.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info};

const GET_RESPONSE: &str = "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 15\r\nConnection: close\r\n\r\nBot is running!";
const HEAD_RESPONSE: &str =
    "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";

/// Binds the port and serves probes on a background task.
pub fn spawn(port: u16) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let listener = match TcpListener::bind(("0.0.0.0", port)).await {
            Ok(l) => l,
            Err(e) => {
                error!(error = %e, port, "failed to start keep-alive server");
                return;
            }
        };
        info!(port, "keep-alive server listening");
        run(listener).await;
    })
}

/// Accept loop; one short-lived task per probe connection.
pub(crate) async fn run(listener: TcpListener) {
    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                tokio::spawn(handle_probe(stream));
            }
            Err(e) => {
                error!(error = %e, "keep-alive accept failed");
            }
        }
    }
}

async fn handle_probe(mut stream: TcpStream) {
    let mut buf = [0u8; 512];
    let n = stream.read(&mut buf).await.unwrap_or(0);
    let request = String::from_utf8_lossy(&buf[..n]);
    let method = request.split_whitespace().next().unwrap_or("");

    let response = match method {
        "GET" => Some(GET_RESPONSE),
        "HEAD" => Some(HEAD_RESPONSE),
        _ => None,
    };
    if let Some(response) = response {
        let _ = stream.write_all(response.as_bytes()).await;
    }
    let _ = stream.shutdown().await;
}
