//! Shared HTTP client with bounded retry
//!
//! All three data-source adapters go through [`HttpClient::get_json`].
//! Transport-level failures (connect, timeout, interrupted exchanges)
//! are retried with exponential backoff; answers the server actually
//! produced (non-2xx statuses, undecodable JSON) are not — the
//! caller's fallback policy handles those.

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default attempt ceiling (first try plus two retries)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Backoff floor and ceiling between attempts
const BACKOFF_MIN: Duration = Duration::from_secs(2);
const BACKOFF_MAX: Duration = Duration::from_secs(10);

/// Failure from an external data-source request.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure that survived the retry budget
    #[error("{service} request failed: {source}")]
    Transport {
        service: String,
        #[source]
        source: reqwest::Error,
    },

    /// The source answered with a non-success status
    #[error("{service} returned HTTP {status}")]
    Status { service: String, status: u16 },

    /// The source answered, but the body was not usable JSON
    #[error("failed to decode {service} response: {message}")]
    Decode { service: String, message: String },
}

/// Delay before the given retry (1-based attempt number just failed).
///
/// Doubles from 2s and is capped at 10s: 2s, 4s, 8s, 10s, 10s, ...
pub fn backoff_delay(attempt: u32) -> Duration {
    let exponential = BACKOFF_MIN.saturating_mul(1u32 << attempt.saturating_sub(1).min(16));
    exponential.min(BACKOFF_MAX)
}

/// Whether a transport error is worth retrying.
///
/// Connect failures, timeouts, and interrupted exchanges (connection
/// reset mid-request, truncated response body) are transient; a
/// response the server actually produced (undecodable JSON) is not.
fn is_transient(error: &reqwest::Error) -> bool {
    if error.is_builder() || error.is_decode() {
        return false;
    }
    error.is_connect() || error.is_timeout() || error.is_request() || error.is_body()
}

/// JSON GET client shared by every provider.
///
/// Wraps a pooled [`reqwest::Client`]; read-only after construction, so
/// one instance serves all providers across concurrent requests.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    max_attempts: u32,
}

impl HttpClient {
    pub fn new(timeout: Duration, max_attempts: u32) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .user_agent("CityConcierge/0.4")
                .build()
                .unwrap_or_default(),
            max_attempts: max_attempts.max(1),
        }
    }

    /// GET a JSON document, retrying transient transport failures.
    pub async fn get_json(
        &self,
        service: &str,
        url: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<Value, ApiError> {
        let mut attempt = 1;
        loop {
            let mut request = self.client.get(url).query(query);
            for (name, value) in headers {
                request = request.header(*name, *value);
            }

            debug!("HTTP GET {} (attempt {}/{})", url, attempt, self.max_attempts);

            let error = match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if !status.is_success() {
                        return Err(ApiError::Status {
                            service: service.to_string(),
                            status: status.as_u16(),
                        });
                    }
                    match response.json::<Value>().await {
                        Ok(value) => return Ok(value),
                        Err(error) if error.is_decode() => {
                            return Err(ApiError::Decode {
                                service: service.to_string(),
                                message: error.to_string(),
                            });
                        }
                        // Body read broke off mid-exchange; same retry
                        // policy as a failed send
                        Err(error) => error,
                    }
                }
                Err(error) => error,
            };

            if is_transient(&error) && attempt < self.max_attempts {
                let delay = backoff_delay(attempt);
                warn!(
                    "Retrying {} request in {:?} (attempt {}): {}",
                    service, delay, attempt, error
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            } else {
                return Err(ApiError::Transport {
                    service: service.to_string(),
                    source: error,
                });
            }
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            DEFAULT_MAX_ATTEMPTS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_and_caps() {
        assert_eq!(backoff_delay(1), Duration::from_secs(2));
        assert_eq!(backoff_delay(2), Duration::from_secs(4));
        assert_eq!(backoff_delay(3), Duration::from_secs(8));
        assert_eq!(backoff_delay(4), Duration::from_secs(10));
        assert_eq!(backoff_delay(20), Duration::from_secs(10));
    }

    #[test]
    fn test_backoff_handles_zero_attempt() {
        // Attempt numbers are 1-based; 0 must still not panic
        assert_eq!(backoff_delay(0), Duration::from_secs(2));
    }

    #[test]
    fn test_client_clamps_attempt_floor() {
        let client = HttpClient::new(Duration::from_secs(1), 0);
        assert_eq!(client.max_attempts, 1);
    }

    #[tokio::test]
    async fn test_interrupted_connection_is_retried() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};

        // Accepts connections and drops them immediately, so every
        // request dies mid-exchange rather than at connect time
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let accepted = Arc::new(AtomicUsize::new(0));
        let counter = accepted.clone();
        std::thread::spawn(move || {
            for stream in listener.incoming() {
                counter.fetch_add(1, Ordering::SeqCst);
                drop(stream);
            }
        });

        let client = HttpClient::new(Duration::from_secs(5), 2);
        let result = client
            .get_json("TestService", &format!("http://{}/", addr), &[], &[])
            .await;

        assert!(matches!(result, Err(ApiError::Transport { .. })));
        // Both attempts must have reached the server
        assert!(accepted.load(Ordering::SeqCst) >= 2);
    }

    #[test]
    fn test_api_error_display() {
        let error = ApiError::Status {
            service: "OpenWeatherMap".to_string(),
            status: 401,
        };
        assert_eq!(error.to_string(), "OpenWeatherMap returned HTTP 401");
    }
}
