//! HTTP client for the remote scoring service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::error::FetchError;

/// The remote scoring endpoints the agent consumes.
///
/// The service is an untrusted black box returning JSON; payload tolerance
/// lives in [`crate::normalize`], not here. Production code uses
/// [`OracleClient`]; tests drive the monitor with in-memory fakes.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Aggregate stats payload, polled every cycle.
    async fn stats(&self) -> Result<Value, FetchError>;

    /// Lightweight health probe.
    async fn health(&self) -> Result<Value, FetchError>;

    /// Detailed status snapshot for the viewer.
    async fn status(&self) -> Result<Value, FetchError>;
}

/// reqwest-backed oracle client with a bounded request timeout.
pub struct OracleClient {
    http: Client,
    base: Url,
}

impl OracleClient {
    /// Build a client against `base`. The timeout bounds every request so a
    /// hung connection cannot starve later poll cycles.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    async fn get_json(&self, path: &str) -> Result<Value, FetchError> {
        let url = self
            .base
            .join(path)
            .map_err(|e| FetchError::Transport(format!("invalid endpoint url: {e}")))?;

        let response = self.http.get(url).send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))
    }
}

fn request_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(error.to_string())
    }
}

#[async_trait]
impl Oracle for OracleClient {
    async fn stats(&self) -> Result<Value, FetchError> {
        self.get_json("stats").await
    }

    async fn health(&self) -> Result<Value, FetchError> {
        self.get_json("health").await
    }

    async fn status(&self) -> Result<Value, FetchError> {
        self.get_json("status").await
    }
}
