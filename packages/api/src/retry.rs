//! Retry on rate limiting with exponential backoff.
//!
//! Only HTTP 429 is retried. Every other non-2xx status fails at once, and
//! network errors are logged and returned unchanged.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// How many times to retry a rate-limited request, and how long to wait first.
///
/// The wait doubles after every retry: with the default policy the delays are
/// 300ms, 600ms and 1200ms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            backoff: Duration::from_millis(300),
        }
    }
}

impl RetryPolicy {
    pub fn new(retries: u32, backoff: Duration) -> Self {
        Self { retries, backoff }
    }

    /// The wait before each retry, in order.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let backoff = self.backoff;
        (0..self.retries).map(move |n| backoff.saturating_mul(1u32.checked_shl(n).unwrap_or(u32::MAX)))
    }
}

async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Send `request`, retrying on HTTP 429 according to `policy`, and parse the
/// JSON body of the first successful response.
///
/// Once the retries are used up while still rate limited, the error is
/// [`ApiError::Status(429)`](ApiError::Status).
pub async fn fetch_with_retry<T: DeserializeOwned>(
    request: RequestBuilder,
    policy: RetryPolicy,
) -> Result<T, ApiError> {
    let mut delays = policy.delays();

    loop {
        let attempt = request.try_clone().ok_or(ApiError::UnclonableRequest)?;
        let response = match attempt.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Fetch error: {}", e);
                return Err(e.into());
            }
        };

        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                tracing::error!("Fetch error: {}", e);
                ApiError::from(e)
            });
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            if let Some(delay) = delays.next() {
                tracing::warn!(
                    backoff_ms = delay.as_millis() as u64,
                    "Rate limited, retrying after backoff"
                );
                sleep(delay).await;
                continue;
            }
        }

        let error = ApiError::Status(status.as_u16());
        tracing::error!("Fetch error: {}", error);
        return Err(error);
    }
}
