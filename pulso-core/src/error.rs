//! Error types for pulso-core

use thiserror::Error;

/// Top-level error type for pulso-core
#[derive(Error, Debug)]
pub enum PulsoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Construction-time misconfiguration. Fatal: the monitor refuses to start.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("poll interval must be at least one minute")]
    InvalidInterval,

    #[error("request timeout must be non-zero")]
    InvalidTimeout,

    #[error("base URL must be an absolute http(s) URL: {0}")]
    InvalidBaseUrl(String),
}

/// A single poll cycle's fetch failure. Contained to that cycle: the
/// scheduler records an unknown reading and keeps running.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Body(String),
}

/// Errors from the durable state store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("state file io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A sink refused or failed to apply an update
#[derive(Error, Debug)]
#[error("sink failure: {0}")]
pub struct SinkError(pub String);
