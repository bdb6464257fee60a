use esclient_core::{ClientConfig, Error, Method, Request, Response, Result};
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// Sends a single request to the search engine.
///
/// Any HTTP status comes back as a [`Response`]. `None` means the request
/// never produced one (refused connection, DNS, timeout, broken body).
/// Implementations do not retry.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &Request) -> Option<Response>;
}

/// reqwest-backed transport bound to one search engine endpoint
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .danger_accept_invalid_certs(config.insecure_skip_verify)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Head => reqwest::Method::HEAD,
        Method::Delete => reqwest::Method::DELETE,
        Method::Post => reqwest::Method::POST,
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &Request) -> Option<Response> {
        let mut builder = self
            .client
            .request(http_method(request.method), self.url(&request.path));
        if let Some(payload) = request.payload() {
            builder = builder.header(CONTENT_TYPE, "application/json").body(payload);
        }
        tracing::debug!("Prepared request for search engine: {}", request);

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Communication problem: {}", e);
                return None;
            }
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        match response.bytes().await {
            Ok(body) => Some(Response {
                status,
                headers,
                body: body.to_vec(),
            }),
            Err(e) => {
                tracing::error!("Couldn't read response body (status {}): {}", status, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned response and hand back the raw request text
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (u16, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if request_complete(&raw) {
                    break;
                }
            }

            let reply = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&raw).into_owned()
        });

        (port, handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    fn transport_for(port: u16) -> HttpTransport {
        HttpTransport::new(&ClientConfig::new("127.0.0.1", port).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_error_status_is_a_response() {
        let (port, server) = serve_once("404 Not Found", r#"{"found": false}"#).await;
        let transport = transport_for(port);

        let request = Request::document(Method::Get, "books", "7", "");
        let response = transport.send(&request).await.expect("response");

        assert_eq!(response.status, 404);
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.json().unwrap(), json!({"found": false}));

        let raw = server.await.unwrap();
        assert!(raw.starts_with("GET /books/_doc/7"));
        assert!(!raw.to_ascii_lowercase().contains("content-type"));
    }

    #[tokio::test]
    async fn test_json_payload() {
        let (port, server) = serve_once("200 OK", r#"{"scroll_id": "abc"}"#).await;
        let transport = transport_for(port);

        let body = json!({"scroll": "1m", "scroll_id": "xyz"});
        let request = Request::new(
            Method::Post,
            "/_search/scroll",
            body.as_object().unwrap().clone(),
        );
        let response = transport.send(&request).await.expect("response");
        assert!(response.is_success());

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /_search/scroll HTTP/1.1"));
        assert!(raw.to_ascii_lowercase().contains("content-type: application/json"));
        let (_, payload) = raw.split_once("\r\n\r\n").unwrap();
        assert_eq!(serde_json::from_str::<serde_json::Value>(payload).unwrap(), body);
    }

    #[tokio::test]
    async fn test_connection_refused_is_absent() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let transport = transport_for(port);
        let request = Request::document(Method::Head, "books", "1", "");
        assert!(transport.send(&request).await.is_none());
    }

    #[test]
    fn test_url_joins_paths() {
        let transport = transport_for(9200);
        assert_eq!(transport.base_url(), "http://127.0.0.1:9200");
        assert_eq!(
            transport.url("/_search/scroll"),
            "http://127.0.0.1:9200/_search/scroll"
        );
        assert_eq!(
            transport.url("idx/_search?scroll=1m"),
            "http://127.0.0.1:9200/idx/_search?scroll=1m"
        );
    }
}
