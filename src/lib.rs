// ABOUTME: Main library entry point for the Strava API client
// ABOUTME: Wires credentials, transport, the request engine and typed resources together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

#![deny(unsafe_code)]

//! # Strava Client
//!
//! An `OAuth2`-authenticated client for the Strava v3 API that stays reliable in
//! the presence of expired credentials, transient outages and rate limiting.
//!
//! ## Architecture
//!
//! ```text
//! caller → resources (activities, athlete, webhooks)
//!        → engine (classify, renew on 401, back off on 503)
//!        → transport (one HTTP round-trip) → Strava
//! ```
//!
//! - **credentials**: in-memory access/refresh pair, replaced atomically on renewal
//! - **transport**: request descriptors and the reqwest-backed invoker
//! - **engine**: bounded retry state machine around a single logical operation
//! - **resources**: typed operations that build descriptors and decode records
//! - **oauth**: token exchange requests and the authorization URL
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use strava_client::{config::StravaConfig, StravaClient, StravaResult};
//!
//! #[tokio::main]
//! async fn main() -> StravaResult<()> {
//!     let client = StravaClient::new(StravaConfig::from_env()?)?;
//!     client.set_tokens("access", "refresh").await?;
//!
//!     let activity = client.activities().get_activity(1_234_567).await?;
//!     println!("{}", activity["name"]);
//!     Ok(())
//! }
//! ```

/// Client entry point
pub mod client;

/// Configuration injected at construction time
pub mod config;

/// Credential pair and its shared holder
pub mod credentials;

/// Request execution engine (renewal and backoff state machine)
pub mod engine;

/// Structured logging setup
pub mod logging;

/// Token exchange and authorization URL
pub mod oauth;

/// Typed resource operations
pub mod resources;

/// HTTP transport boundary
pub mod transport;

pub use client::StravaClient;
pub use credentials::{CredentialPair, CredentialStore};
pub use engine::{AttemptState, BackoffPolicy, Operation, RequestEngine};
pub use oauth::{GrantType, TokenEndpoint};
pub use resources::{ActivityListParams, ActivityResource, AthleteResource, WebhookResource};
pub use strava_core::{
    classify, constants, AspectType, FailureKind, ObjectType, StravaError, StravaResult,
    Subscription, SubscriptionChallenge, TokenGrant, WebhookEvent,
};
pub use transport::{ApiRequest, HttpTransport, RawResponse, Transport, TransportError};
