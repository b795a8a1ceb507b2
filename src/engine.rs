// ABOUTME: Request execution engine: classify each outcome and apply renewal or backoff
// ABOUTME: Attempt counters live in a per-call AttemptState; credentials are shared and locked
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

//! # Request Execution Engine
//!
//! One logical operation runs as a bounded sequence of transport calls:
//!
//! - `2xx`: decoded JSON body is returned
//! - `401`: credentials are renewed through the token endpoint (at most
//!   `max_refresh_attempts` times) and the operation is rebuilt and resent
//! - `503`: the same request is replayed after 1s, 2s, 4s, then the call fails
//!   with [`StravaError::ServiceUnavailableExhausted`]
//! - `400`, `404`, `429`: terminal immediately
//! - other `5xx`, unexpected statuses and network failures: terminal
//!   [`StravaError::UpstreamFailure`], never retried
//!
//! The renewal call runs through the same backoff policy, but a `401` from the
//! token endpoint is terminal: there is nothing left to renew with.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use strava_core::constants::retry::{BASE_BACKOFF_DELAY_MS, MAX_BACKOFF_RETRIES};
use strava_core::{classify, FailureKind, StravaError, StravaResult, TokenGrant};
use tracing::{debug, error, info, warn};

use crate::credentials::{CredentialPair, CredentialStore};
use crate::oauth::{GrantType, TokenEndpoint};
use crate::transport::{ApiRequest, RawResponse, Transport};

/// Builds the request for one logical operation from the current credentials
///
/// The engine calls `build` again after every renewal so the retried request
/// always carries the freshest token.
pub trait Operation: Send + Sync {
    /// Produce the request to send
    fn build(&self, credentials: &CredentialPair) -> ApiRequest;
}

impl<F> Operation for F
where
    F: Fn(&CredentialPair) -> ApiRequest + Send + Sync,
{
    fn build(&self, credentials: &CredentialPair) -> ApiRequest {
        self(credentials)
    }
}

impl Operation for ApiRequest {
    fn build(&self, _credentials: &CredentialPair) -> ApiRequest {
        self.clone()
    }
}

/// Exponential backoff applied to `503` responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Delay before the first retry; doubles each time
    pub base_delay: Duration,
    /// Retries allowed after the first attempt
    pub max_retries: u32,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(BASE_BACKOFF_DELAY_MS),
            max_retries: MAX_BACKOFF_RETRIES,
        }
    }
}

impl BackoffPolicy {
    /// Default ceiling with a custom base delay
    #[must_use]
    pub fn with_base_delay(base_delay: Duration) -> Self {
        Self {
            base_delay,
            ..Self::default()
        }
    }

    /// Delay before the given 1-based retry: `base * 2^(retry - 1)`
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(1_u32 << exponent)
    }
}

/// Counters scoped to one top-level call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttemptState {
    /// Credential renewals performed so far
    pub refresh_attempts_used: u32,
    /// `503` retries performed so far
    pub backoff_attempts_used: u32,
}

/// Result of a single round-trip, before recovery policy
enum Outcome {
    Success(Value),
    Failure {
        kind: FailureKind,
        status: Option<u16>,
        body: String,
    },
}

/// How the backoff loop ended when it did not succeed
enum AttemptFailure {
    /// Credentials rejected; the caller decides whether to renew
    Unauthorized { status: u16, body: String },
    /// Nothing more can be done for this call
    Terminal(StravaError),
}

/// Runs logical operations against a transport with renewal and backoff
pub struct RequestEngine {
    transport: Arc<dyn Transport>,
    credentials: Arc<CredentialStore>,
    token_endpoint: TokenEndpoint,
    max_refresh_attempts: u32,
    backoff: BackoffPolicy,
}

impl std::fmt::Debug for RequestEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestEngine")
            .field("token_endpoint", &self.token_endpoint)
            .field("max_refresh_attempts", &self.max_refresh_attempts)
            .field("backoff", &self.backoff)
            .finish_non_exhaustive()
    }
}

impl RequestEngine {
    /// Create an engine with the default backoff policy
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `max_refresh_attempts` is zero
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Arc<CredentialStore>,
        token_endpoint: TokenEndpoint,
        max_refresh_attempts: u32,
    ) -> StravaResult<Self> {
        if max_refresh_attempts < 1 {
            return Err(StravaError::invalid_argument(
                "max_refresh_attempts must be at least 1",
            ));
        }
        Ok(Self {
            transport,
            credentials,
            token_endpoint,
            max_refresh_attempts,
            backoff: BackoffPolicy::default(),
        })
    }

    /// Replace the backoff policy
    #[must_use]
    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Shared credential holder
    #[must_use]
    pub const fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    /// Token endpoint used for renewal
    #[must_use]
    pub const fn token_endpoint(&self) -> &TokenEndpoint {
        &self.token_endpoint
    }

    /// Configured renewal ceiling
    #[must_use]
    pub const fn max_refresh_attempts(&self) -> u32 {
        self.max_refresh_attempts
    }

    /// Run one logical operation to completion
    ///
    /// # Errors
    ///
    /// Returns the first terminal failure: a typed HTTP error, a retry
    /// ceiling, a renewal failure or an undecodable success body
    pub async fn execute<O>(&self, operation: &O) -> StravaResult<Value>
    where
        O: Operation + ?Sized,
    {
        let mut state = AttemptState::default();

        loop {
            let credentials = self.credentials.snapshot().await;
            let request = credentials.authorize(operation.build(&credentials));

            match self.send_with_backoff(&request, &mut state).await {
                Ok(body) => return Ok(body),
                Err(AttemptFailure::Terminal(err)) => return Err(err),
                Err(AttemptFailure::Unauthorized { status, body }) => {
                    if state.refresh_attempts_used >= self.max_refresh_attempts {
                        warn!(
                            status,
                            attempts = state.refresh_attempts_used,
                            body_length = body.len(),
                            "Strava credentials still rejected after maximum refresh attempts"
                        );
                        return Err(StravaError::MaxAttemptsExceeded {
                            attempts: state.refresh_attempts_used,
                        });
                    }
                    state.refresh_attempts_used += 1;
                    info!(
                        attempt = state.refresh_attempts_used,
                        max_attempts = self.max_refresh_attempts,
                        "Strava access token rejected, refreshing"
                    );
                    self.renew(&credentials).await?;
                }
            }
        }
    }

    /// Send a request that carries no stored credentials
    ///
    /// Backoff still applies; a `401` is terminal.
    ///
    /// # Errors
    ///
    /// Returns the first terminal failure, with `401` as `Unauthorized`
    pub async fn execute_unauthenticated(&self, request: &ApiRequest) -> StravaResult<Value> {
        let mut state = AttemptState::default();
        match self.send_with_backoff(request, &mut state).await {
            Ok(body) => Ok(body),
            Err(AttemptFailure::Terminal(err)) => Err(err),
            Err(AttemptFailure::Unauthorized { status, body }) => {
                Err(StravaError::Unauthorized { status, body })
            }
        }
    }

    /// Exchange the refresh token and store the new pair
    ///
    /// Holds the renewal lock for the whole exchange. If another call already
    /// replaced the rejected token, the stored pair is reused without a
    /// network round-trip.
    async fn renew(&self, rejected: &CredentialPair) -> StravaResult<()> {
        let _guard = self.credentials.lock_renewal().await;

        let current = self.credentials.snapshot().await;
        if current.is_authenticated() && current.access_token() != rejected.access_token() {
            debug!("Strava credentials already refreshed by a concurrent call");
            return Ok(());
        }
        if current.refresh_token().is_empty() {
            return Err(StravaError::InvalidCredential {
                field: "refresh_token",
            });
        }

        let request = self
            .token_endpoint
            .exchange_request(GrantType::RefreshToken, current.refresh_token());
        let body = self.execute_unauthenticated(&request).await?;
        let grant = TokenGrant::from_json("token refresh", &body)?;

        self.credentials
            .set(grant.access_token, grant.refresh_token)
            .await?;
        info!("Strava access token refreshed");
        Ok(())
    }

    /// Send one request, replaying it on `503` until the backoff ceiling
    async fn send_with_backoff(
        &self,
        request: &ApiRequest,
        state: &mut AttemptState,
    ) -> Result<Value, AttemptFailure> {
        loop {
            let outcome = self
                .send_once(request)
                .await
                .map_err(AttemptFailure::Terminal)?;

            let (kind, status, body) = match outcome {
                Outcome::Success(value) => return Ok(value),
                Outcome::Failure { kind, status, body } => (kind, status, body),
            };

            match (kind, status) {
                (FailureKind::Unauthorized, Some(status)) => {
                    return Err(AttemptFailure::Unauthorized { status, body });
                }
                (FailureKind::ServiceUnavailable, _) => {
                    if state.backoff_attempts_used >= self.backoff.max_retries {
                        let attempts = state.backoff_attempts_used + 1;
                        warn!(
                            attempts,
                            "Strava API unavailable, giving up after maximum retries"
                        );
                        return Err(AttemptFailure::Terminal(
                            StravaError::ServiceUnavailableExhausted { attempts },
                        ));
                    }
                    state.backoff_attempts_used += 1;
                    let delay = self.backoff.delay_for(state.backoff_attempts_used);
                    warn!(
                        attempt = state.backoff_attempts_used,
                        max_retries = self.backoff.max_retries,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Strava API unavailable (503), backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                (kind, status) => {
                    let err = terminal_error(kind, status, body);
                    if matches!(err, StravaError::UpstreamFailure { .. }) {
                        error!(%kind, http.status = ?status, http.path = request.path(), "Strava API call failed upstream");
                    }
                    return Err(AttemptFailure::Terminal(err));
                }
            }
        }
    }

    /// One transport call, classified
    async fn send_once(&self, request: &ApiRequest) -> StravaResult<Outcome> {
        debug!(http.method = %request.method(), http.path = request.path(), "Strava API attempt");
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, http.path = request.path(), "Strava API request got no response");
                return Ok(Outcome::Failure {
                    kind: FailureKind::NetworkFailure,
                    status: None,
                    body: err.to_string(),
                });
            }
        };

        classify_response(&response)
    }
}

fn classify_response(response: &RawResponse) -> StravaResult<Outcome> {
    match classify(response.status) {
        None => response
            .decode_json()
            .map(Outcome::Success)
            .map_err(|e| StravaError::invalid_response("response body", e)),
        Some(kind) => {
            debug!(status = response.status, %kind, "Strava API call failed");
            Ok(Outcome::Failure {
                kind,
                status: Some(response.status),
                body: response.body_text(),
            })
        }
    }
}

fn terminal_error(kind: FailureKind, status: Option<u16>, body: String) -> StravaError {
    match (kind, status) {
        (FailureKind::BadRequest, Some(status)) => StravaError::BadRequest { status, body },
        (FailureKind::NotFound, Some(status)) => StravaError::NotFound { status, body },
        (FailureKind::RateLimited, Some(status)) => StravaError::RateLimited { status, body },
        (kind, status) => StravaError::UpstreamFailure { kind, status, body },
    }
}
