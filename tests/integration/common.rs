//! Shared helpers for integration tests.

use std::process::Command;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Runs the vtquery binary with the given arguments.
///
/// Returns (exit code, stdout, stderr).
pub fn run_vtquery(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_vtquery"))
        .args(args)
        .env_remove("VTCTLD_SERVER")
        .env_remove("VTCTLD_ACTION_TIMEOUT")
        .output()
        .expect("Failed to execute vtquery");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}

/// A request captured by [`serve_once`].
#[derive(Debug)]
pub struct CapturedRequest {
    pub request_line: String,
    pub body: String,
}

/// Serves exactly one HTTP request with a canned reply.
///
/// Returns the base address to point the client at and a receiver for the
/// captured request.
pub async fn serve_once(status: &str, reply: &str) -> (String, oneshot::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{reply}",
        reply.len()
    );

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        // Read headers, then exactly Content-Length bytes of body.
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = find(&buf, b"\r\n\r\n") {
                break pos + 4;
            }
            if n == 0 {
                return;
            }
        };

        let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = headers
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        let request_line = headers.lines().next().unwrap_or_default().to_string();
        let body = String::from_utf8_lossy(&buf[header_end..]).to_string();
        let _ = tx.send(CapturedRequest { request_line, body });
    });

    (format!("http://{addr}"), rx)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
