//! HTTP client shared by reporters
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - Exponential backoff retry logic (max 3 retries)
//! - Rate limit and authentication error handling

use crate::error::ReportError;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for HTTP requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("lockdiff/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (in milliseconds)
const BASE_DELAY_MS: u64 = 100;

/// Upper bound for a single backoff delay (in milliseconds)
const MAX_DELAY_MS: u64 = 10_000;

/// Delay before the retry after one that waited `delay` milliseconds
fn next_delay(delay: u64) -> u64 {
    delay.saturating_mul(2).min(MAX_DELAY_MS)
}

/// HTTP client wrapper with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

/// A request to send through [`HttpClient`]
#[derive(Debug, Clone)]
pub struct ApiRequest<'a> {
    pub method: Method,
    pub url: &'a str,
    pub accept: Option<&'a str>,
    pub token: Option<&'a str>,
    pub body: Option<&'a serde_json::Value>,
}

impl<'a> ApiRequest<'a> {
    pub fn new(method: Method, url: &'a str) -> Self {
        Self {
            method,
            url,
            accept: None,
            token: None,
            body: None,
        }
    }

    /// Set the `Accept` header
    pub fn accept(mut self, media_type: &'a str) -> Self {
        self.accept = Some(media_type);
        self
    }

    /// Authenticate with a bearer token
    pub fn token(mut self, token: &'a str) -> Self {
        self.token = Some(token);
        self
    }

    /// Attach a JSON body
    pub fn json(mut self, body: &'a serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, ReportError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, ReportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                ReportError::network_error(
                    "HTTP client",
                    format!("failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// Set the maximum number of retries
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Send a request with retry logic
    ///
    /// Retries on 429 and transport errors. Any other non-success status
    /// fails immediately.
    pub async fn send(
        &self,
        reporter: &str,
        request: &ApiRequest<'_>,
    ) -> Result<reqwest::Response, ReportError> {
        let mut last_error = None;
        let mut delay = BASE_DELAY_MS;

        for attempt in 0..=self.max_retries {
            let mut builder = self.client.request(request.method.clone(), request.url);
            if let Some(accept) = request.accept {
                builder = builder.header(reqwest::header::ACCEPT, accept);
            }
            if let Some(token) = request.token {
                builder = builder.bearer_auth(token);
            }
            if let Some(body) = request.body {
                builder = builder.json(body);
            }

            debug!(reporter, method = %request.method, url = request.url, attempt, "sending request");

            match builder.send().await {
                Ok(response) => {
                    let status = response.status();

                    // Check for rate limiting
                    if status == StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(ReportError::rate_limit_exceeded(reporter));

                        if attempt < self.max_retries {
                            warn!(reporter, delay_ms = delay, "rate limited, retrying");
                            tokio::time::sleep(Duration::from_millis(delay)).await;
                            delay = next_delay(delay);
                            continue;
                        }
                        break;
                    }

                    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                        return Err(ReportError::AuthenticationError {
                            reporter: reporter.to_string(),
                            message: format!("HTTP {}", status),
                        });
                    }

                    if !status.is_success() {
                        return Err(ReportError::network_error(
                            reporter,
                            format!("HTTP {}", status),
                        ));
                    }

                    return Ok(response);
                }
                Err(e) => {
                    // Check for timeout
                    if e.is_timeout() {
                        last_error = Some(ReportError::timeout(reporter));
                    } else {
                        last_error = Some(ReportError::network_error(reporter, e.to_string()));
                    }

                    if attempt < self.max_retries {
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        delay = next_delay(delay);
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ReportError::network_error(reporter, "unknown error")))
    }

    /// Send a request and parse the JSON response
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        reporter: &str,
        request: &ApiRequest<'_>,
    ) -> Result<T, ReportError> {
        let response = self.send(reporter, request).await?;

        response.json::<T>().await.map_err(|e| {
            ReportError::invalid_response(reporter, format!("failed to parse JSON: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_http_client_with_config() {
        let client = HttpClient::with_config(Duration::from_secs(60), "test-agent/1.0");
        assert!(client.is_ok());
    }

    #[test]
    fn test_http_client_with_max_retries() {
        let client = HttpClient::new().unwrap().with_max_retries(5);
        assert_eq!(client.max_retries, 5);
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(30));
        assert!(DEFAULT_USER_AGENT.starts_with("lockdiff/"));
        assert_eq!(MAX_RETRIES, 3);
        assert_eq!(BASE_DELAY_MS, 100);
        assert_eq!(MAX_DELAY_MS, 10_000);
    }

    #[test]
    fn test_next_delay_doubles_up_to_cap() {
        assert_eq!(next_delay(BASE_DELAY_MS), 200);
        assert_eq!(next_delay(6_400), MAX_DELAY_MS);
        assert_eq!(next_delay(MAX_DELAY_MS), MAX_DELAY_MS);
        assert_eq!(next_delay(u64::MAX), MAX_DELAY_MS);
    }

    #[test]
    fn test_backoff_sequence_never_overflows() {
        let mut delay = BASE_DELAY_MS;
        for _ in 0..100 {
            delay = next_delay(delay);
        }
        assert_eq!(delay, MAX_DELAY_MS);
    }

    #[test]
    fn test_api_request_builder() {
        let body = serde_json::json!({"body": "hi"});
        let request = ApiRequest::new(Method::POST, "https://example.com")
            .token("secret")
            .json(&body);
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.accept, None);
        assert_eq!(request.token, Some("secret"));
        assert_eq!(request.body, Some(&body));
    }

    #[tokio::test]
    async fn test_send_connection_refused_is_network_error() {
        // Nothing listens on port 9 on loopback
        let client = HttpClient::new().unwrap().with_max_retries(0);
        let request = ApiRequest::new(Method::GET, "http://127.0.0.1:9/");
        let err = client.send("GitHub", &request).await.unwrap_err();
        assert!(matches!(
            err,
            ReportError::NetworkError { .. } | ReportError::Timeout { .. }
        ));
    }
}
