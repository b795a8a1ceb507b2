// ABOUTME: HTTP transport boundary: one round-trip per call, no retries, no sleeping
// ABOUTME: Network-level failures come back as a distinct TransportError, never a panic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

mod http;
mod request;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

pub use http::{build_client, HttpTransport};
pub use request::ApiRequest;

/// Performs exactly one HTTP round-trip
///
/// Implementations must not retry or sleep; all recovery policy lives in the
/// engine.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return whatever the server answered
    ///
    /// # Errors
    ///
    /// Returns `TransportError` only when no HTTP response was received
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError>;
}

/// Failure to obtain any HTTP response
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Deadline elapsed before a response arrived
    #[error("request timed out: {0}")]
    Timeout(String),
    /// DNS or TCP/TLS connection failure
    #[error("connection failed: {0}")]
    Connect(String),
    /// Any other failure while sending or reading the response
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// Status, headers and body of a received response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers in arrival order
    pub headers: Vec<(String, String)>,
    /// Raw body bytes
    pub body: Bytes,
}

impl RawResponse {
    /// Response without headers
    #[must_use]
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Response whose body is the serialized JSON value
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// Body as text, lossily decoded
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body; an empty body (e.g. 204) decodes to `null`
    ///
    /// # Errors
    ///
    /// Returns the JSON parse error for a non-empty, non-JSON body
    pub fn decode_json(&self) -> Result<Value, serde_json::Error> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&self.body)
    }
}
