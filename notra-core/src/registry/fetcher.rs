//! Registry fetching over HTTP
//!
//! The body is parsed into [`Registry`] and otherwise trusted: there is no
//! schema or checksum validation beyond what deserialization enforces.

use std::time::Duration;
use tracing::debug;

use super::Registry;
use crate::error::FetchError;

/// HTTP client for registry documents
pub struct RegistryClient {
    client: reqwest::Client,
}

impl RegistryClient {
    /// Create a client whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("notra-editor/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// GET `url` and parse the body as a registry document
    pub async fn fetch(&self, url: &str) -> Result<Registry, FetchError> {
        debug!("Fetching registry from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(error_chain(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(error_chain(&e)))?;

        let registry =
            Registry::from_json(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        debug!(
            "Fetched registry '{}' v{} ({} files, {} dependencies)",
            registry.name,
            registry.version,
            registry.files.len(),
            registry.dependencies.len()
        );

        Ok(registry)
    }
}

/// Fetch a registry document with a one-off client
pub async fn fetch_registry(url: &str, timeout: Duration) -> Result<Registry, FetchError> {
    RegistryClient::new(timeout)?.fetch(url).await
}

/// reqwest's top-level message rarely says what went wrong; include sources
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response on a loopback port
    async fn serve_once(status_line: &'static str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{addr}/r/editor.json")
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let body = r#"{"name":"editor","version":"1.0.0","description":"","files":[{"path":"a.ts","content":"a\r\n"}],"dependencies":[]}"#;
        let url = serve_once("200 OK", body.to_string()).await;

        let registry = fetch_registry(&url, Duration::from_secs(5)).await.unwrap();
        assert_eq!(registry.name, "editor");
        assert_eq!(registry.files[0].content, "a\r\n");
    }

    #[tokio::test]
    async fn test_fetch_http_status_error() {
        let url = serve_once("404 Not Found", "Not Found".to_string()).await;

        let err = fetch_registry(&url, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.to_string(), "Failed to fetch registry: HTTP 404 Not Found");
    }

    #[tokio::test]
    async fn test_fetch_malformed_json() {
        let url = serve_once("200 OK", "{\"name\": ".to_string()).await;

        let err = fetch_registry(&url, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to fetch registry: "));
    }

    #[tokio::test]
    async fn test_fetch_accepts_unvalidated_paths() {
        let body = r#"{"name":"x","version":"1","description":"","files":[{"path":"../escape.ts","content":""}],"dependencies":[]}"#;
        let url = serve_once("200 OK", body.to_string()).await;

        let registry = fetch_registry(&url, Duration::from_secs(5)).await.unwrap();
        assert_eq!(registry.files[0].path, "../escape.ts");
    }

    #[tokio::test]
    async fn test_fetch_transport_error() {
        // Bind then drop to get a port with nothing listening
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = fetch_registry(&format!("http://{addr}/editor.json"), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
