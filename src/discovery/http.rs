//! Thin JSON-over-HTTP client shared by every upstream adapter.
//!
//! Wraps a [`reqwest::Client`] with a request timeout, an identifying
//! User-Agent, and an optional [`governor`] rate limiter. Failures are mapped
//! onto [`mediascout_common::Error`] so adapters can use `?` and leave the
//! degrade-to-empty decision to the provider boundary.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{Quota, RateLimiter};
use mediascout_common::{Error, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

type DirectRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// JSON GET client bound to one upstream base URL.
pub(crate) struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    limiter: Option<DirectRateLimiter>,
}

impl ApiClient {
    /// Create a client for `base_url` that identifies itself as `user_agent`.
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(user_agent.to_string())
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to a default HTTP client");
                reqwest::Client::new()
            });

        Self {
            http,
            base_url: base_url.into(),
            limiter: None,
        }
    }

    /// Throttle outgoing requests to `per_second`. Zero disables throttling.
    pub fn with_rate_limit(mut self, per_second: u32) -> Self {
        self.limiter =
            NonZeroU32::new(per_second).map(|n| RateLimiter::direct(Quota::per_second(n)));
        self
    }

    /// Point the client at a different base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// GET `path` relative to the configured base URL and decode JSON.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        headers: &[(&'static str, &str)],
    ) -> Result<T> {
        self.get_json_from(&self.base_url, path, params, headers)
            .await
    }

    /// GET `path` relative to an explicit base URL and decode JSON.
    ///
    /// Query parameters are attached with [`reqwest::RequestBuilder::query`]
    /// so API keys never end up in the logged URL.
    pub async fn get_json_from<T: DeserializeOwned>(
        &self,
        base_url: &str,
        path: &str,
        params: &[(&str, &str)],
        headers: &[(&'static str, &str)],
    ) -> Result<T> {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }

        let url = format!("{}{}", base_url.trim_end_matches('/'), path);
        debug!(url = %url, "GET");

        let mut request = self.http.get(&url).query(params);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::status(status.as_u16(), url));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(format!("{url}: {e}")))?;

        serde_json::from_slice(&body).map_err(|e| Error::decode(format!("{url}: {e}")))
    }
}
