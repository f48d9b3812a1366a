//! HTTP client abstraction for testability.

use crate::{MapError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;

/// Status and body of a completed HTTP exchange. Callers decide what a
/// non-2xx status means; only transport-level failures surface as `Err`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(MapError::from)
    }
}

/// Trait for asynchronous HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
#[async_trait]
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an HTTP GET request. `Err` only on transport failure.
    async fn get(&self, url: &str) -> Result<HttpResponse>;

    /// Performs an HTTP POST request with a JSON body. `Err` only on
    /// transport failure.
    async fn post_json(&self, url: &str, json_body: &str) -> Result<HttpResponse>;
}

/// Shared HTTP client with a custom User-Agent so that the provider does
/// not reject the request. Building the client once avoids the cost of TLS
/// and connection pool setup for every call.
static SHARED_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .user_agent("tilesession/0.1 (+https://github.com/tilesession/tilesession)")
        .build()
        .expect("failed to build reqwest client")
});

/// Real HTTP client implementation using reqwest.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestClient;

impl ReqwestClient {
    pub fn new() -> Self {
        Self
    }

    async fn read(response: reqwest::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| MapError::Transport(format!("failed to read response: {}", e)))?;
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

#[async_trait]
impl AsyncHttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        log::debug!("GET {}", url);
        let response = SHARED_CLIENT
            .get(url)
            .send()
            .await
            .map_err(|e| MapError::Transport(format!("request failed: {}", e)))?;
        Self::read(response).await
    }

    async fn post_json(&self, url: &str, json_body: &str) -> Result<HttpResponse> {
        log::debug!("POST {}", url);
        let response = SHARED_CLIENT
            .post(url)
            .header("Content-Type", "application/json")
            .body(json_body.to_string())
            .send()
            .await
            .map_err(|e| MapError::Transport(format!("POST request failed: {}", e)))?;
        Self::read(response).await
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// A request the mock client observed.
    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub method: &'static str,
        pub url: String,
        pub body: Option<String>,
    }

    /// Mock HTTP client that replays scripted responses and records every
    /// request it receives.
    #[derive(Default)]
    pub struct MockHttpClient {
        responses: Mutex<VecDeque<Result<HttpResponse>>>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(status: u16, body: &str) -> Self {
            let mock = Self::new();
            mock.push_response(status, body);
            mock
        }

        pub fn with_transport_error(message: &str) -> Self {
            let mock = Self::new();
            mock.push_error(message);
            mock
        }

        pub fn push_response(&self, status: u16, body: &str) {
            self.responses
                .lock()
                .unwrap()
                .push_back(Ok(HttpResponse::new(status, body.as_bytes().to_vec())));
        }

        pub fn push_error(&self, message: &str) {
            self.responses
                .lock()
                .unwrap()
                .push_back(Err(MapError::Transport(message.to_string())));
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn next_response(&self) -> Result<HttpResponse> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(MapError::Transport("no scripted response".to_string())))
        }

        fn record(&self, method: &'static str, url: &str, body: Option<&str>) {
            self.requests.lock().unwrap().push(RecordedRequest {
                method,
                url: url.to_string(),
                body: body.map(str::to_string),
            });
        }
    }

    #[async_trait]
    impl AsyncHttpClient for MockHttpClient {
        async fn get(&self, url: &str) -> Result<HttpResponse> {
            self.record("GET", url, None);
            self.next_response()
        }

        async fn post_json(&self, url: &str, json_body: &str) -> Result<HttpResponse> {
            self.record("POST", url, Some(json_body));
            self.next_response()
        }
    }

    #[test]
    fn test_http_response_success_range() {
        assert!(HttpResponse::new(200, vec![]).is_success());
        assert!(HttpResponse::new(204, vec![]).is_success());
        assert!(!HttpResponse::new(403, vec![]).is_success());
        assert!(!HttpResponse::new(500, vec![]).is_success());
    }

    #[tokio::test]
    async fn test_mock_client_replays_and_records() {
        let mock = MockHttpClient::with_response(200, "{\"ok\":true}");
        let response = mock.get("http://example.com/a").await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(mock.request_count(), 1);
        assert_eq!(mock.requests()[0].url, "http://example.com/a");

        // Responses are consumed in order; an exhausted queue is a transport error.
        assert!(mock.get("http://example.com/b").await.is_err());
    }
}
