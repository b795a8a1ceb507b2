// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, a scripted in-memory transport and response fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `strava_client`

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use serde_json::{json, Value};
use strava_client::{
    config::StravaConfig, ApiRequest, CredentialStore, RawResponse, RequestEngine, TokenEndpoint,
    Transport, TransportError,
};

static INIT_LOGGER: Once = Once::new();

/// Token endpoint URL used by scripted engines
pub const TOKEN_URL: &str = "https://www.strava.com/oauth/token";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Transport that replays a fixed script and records every request it sees
///
/// Once the script runs out every call fails with a transport error, which
/// the engine reports as a network failure.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new(
        script: impl IntoIterator<Item = Result<RawResponse, TransportError>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Requests sent so far, in order
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("script exhausted".to_owned())))
    }
}

/// Response with the given status and an empty body
pub fn status(code: u16) -> Result<RawResponse, TransportError> {
    Ok(RawResponse::new(code, ""))
}

/// Response with the given status and JSON body
pub fn json_response(code: u16, body: &Value) -> Result<RawResponse, TransportError> {
    Ok(RawResponse::json(code, body))
}

/// Successful token endpoint response
pub fn token_response(access: &str, refresh: &str) -> Result<RawResponse, TransportError> {
    json_response(200, &token_json(access, refresh))
}

pub fn token_json(access: &str, refresh: &str) -> Value {
    json!({
        "token_type": "Bearer",
        "access_token": access,
        "refresh_token": refresh,
        "expires_at": 1_900_000_000,
        "expires_in": 21_600,
        "athlete": {"id": 134_815, "firstname": "Jane"}
    })
}

/// Push subscription as returned by Strava
pub fn subscription_json(id: u64, callback_url: &str) -> Value {
    json!({
        "id": id,
        "resource_state": 2,
        "application_id": 4321,
        "callback_url": callback_url,
        "created_at": "2024-03-01T10:00:00Z",
        "updated_at": "2024-03-02T11:30:00Z"
    })
}

/// Engine over `transport` holding `access-0` / `refresh-0`
pub fn scripted_engine(transport: Arc<ScriptedTransport>, max_refresh_attempts: u32) -> RequestEngine {
    let credentials = Arc::new(CredentialStore::with_tokens("access-0", "refresh-0").unwrap());
    RequestEngine::new(
        transport,
        credentials,
        TokenEndpoint::new(TOKEN_URL, "client-1", "secret-1"),
        max_refresh_attempts,
    )
    .unwrap()
}

/// Configuration pointing every endpoint at a mock server, with fast backoff
pub fn mock_config(server_uri: &str) -> StravaConfig {
    let mut config = StravaConfig::new("client-1", "secret-1");
    config.base_url = format!("{server_uri}/api/v3");
    config.token_url = format!("{server_uri}/oauth/token");
    config.authorize_url = format!("{server_uri}/oauth/authorize");
    config.backoff.base_delay_ms = 1;
    config
}
