/*!
 * Common test utilities for the transfix test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Route library logs to the test output when RUST_LOG is set
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// What the stub server does with one connection
#[derive(Debug, Clone)]
pub enum StubResponse {
    /// Answer with a status and raw body
    Reply { status: u16, body: Vec<u8> },
    /// Read the request and never answer
    Hang,
}

impl StubResponse {
    pub fn ok(body: &str) -> Self {
        Self::Reply { status: 200, body: body.as_bytes().to_vec() }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self::Reply { status, body: body.as_bytes().to_vec() }
    }
}

/// A request as seen by the stub server
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    /// Path and query
    pub target: String,
    pub body: String,
}

impl CapturedRequest {
    /// Decoded query parameters
    pub fn query(&self) -> Vec<(String, String)> {
        match self.target.split_once('?') {
            Some((_, query)) => url::form_urlencoded::parse(query.as_bytes()).into_owned().collect(),
            None => Vec::new(),
        }
    }

    /// Decoded form fields
    pub fn form(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(self.body.as_bytes()).into_owned().collect()
    }
}

/// Minimal HTTP/1.1 responder on 127.0.0.1.
///
/// Each connection gets the next scripted response; the last one repeats.
/// Every response closes its connection.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    pub async fn start(responses: Vec<StubResponse>) -> Self {
        assert!(!responses.is_empty(), "stub server needs at least one response");

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub server");
        let addr = listener.local_addr().expect("stub server address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&requests);

        let handle = tokio::spawn(async move {
            let mut served = 0usize;
            while let Ok((mut socket, _)) = listener.accept().await {
                let response = responses[served.min(responses.len() - 1)].clone();
                served += 1;

                let request = read_request(&mut socket).await;
                captured.lock().unwrap().push(request);

                match response {
                    StubResponse::Reply { status, body } => {
                        let head = format!(
                            "HTTP/1.1 {} Stub\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                            status,
                            body.len()
                        );
                        let _ = socket.write_all(head.as_bytes()).await;
                        let _ = socket.write_all(&body).await;
                        let _ = socket.shutdown().await;
                    }
                    StubResponse::Hang => {
                        tokio::spawn(async move {
                            tokio::time::sleep(Duration::from_secs(30)).await;
                            drop(socket);
                        });
                    }
                }
            }
        });

        Self {
            base_url: format!("http://{}/", addr),
            requests,
            handle,
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// URL of a local port nothing listens on
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind free port");
    let addr = listener.local_addr().expect("free port address");
    drop(listener);
    format!("http://{}/", addr)
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

async fn read_request(socket: &mut TcpStream) -> CapturedRequest {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = find_subsequence(&buffer, b"\r\n\r\n") {
            break pos + 4;
        }
        let read = socket.read(&mut chunk).await.unwrap_or(0);
        if read == 0 {
            break buffer.len();
        }
        buffer.extend_from_slice(&chunk[..read]);
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buffer.len() < header_end + content_length {
        let read = socket.read(&mut chunk).await.unwrap_or(0);
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);
    }

    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    CapturedRequest {
        method: request_line.next().unwrap_or_default().to_string(),
        target: request_line.next().unwrap_or_default().to_string(),
        body: String::from_utf8_lossy(&buffer[header_end..]).to_string(),
    }
}
