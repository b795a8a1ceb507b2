// ABOUTME: reqwest-backed transport with connection pooling and configured timeouts
// ABOUTME: Resolves descriptor paths against the API base URL and sends exactly once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use tracing::debug;

use super::{ApiRequest, RawResponse, Transport, TransportError};
use crate::config::HttpClientConfig;

/// Build a pooled HTTP client with the configured timeouts
///
/// Falls back to reqwest defaults if the builder rejects the settings.
#[must_use]
pub fn build_client(config: &HttpClientConfig) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Transport that sends descriptors over HTTP with reqwest
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport rooted at `base_url`
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    /// API base URL without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resolve_url(&self, request: &ApiRequest) -> String {
        if request.is_absolute() {
            return request.path().to_owned();
        }
        format!(
            "{}/{}",
            self.base_url,
            request.path().trim_start_matches('/')
        )
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        let url = self.resolve_url(request);
        debug!(http.method = %request.method(), http.url = %url, "Sending Strava API request");

        let mut builder = self.client.request(request.method().clone(), &url);
        if !request.query_params().is_empty() {
            builder = builder.query(request.query_params());
        }
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await?;

        debug!(http.status = status, body_length = body.len(), "Received Strava API response");

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
