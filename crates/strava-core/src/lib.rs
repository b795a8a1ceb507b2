// ABOUTME: Core types and constants for the Strava API client
// ABOUTME: Foundation crate with error taxonomy, status classification, and record codecs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

#![deny(unsafe_code)]

//! # Strava Core
//!
//! Foundation crate for the Strava API client. It holds the pieces that never
//! touch the network so they can be shared by the client crate, its CLI and
//! any host application that only needs to decode payloads.
//!
//! ## Modules
//!
//! - **errors**: `StravaError` taxonomy and the authoritative status classifier
//! - **models**: subscription, webhook event and token grant records
//! - **constants**: default endpoints, retry ceilings and environment keys

/// Error taxonomy and HTTP status classification
pub mod errors;

/// Wire records decoded from Strava responses and push payloads
pub mod models;

/// Default endpoints, retry constants and environment variable names
pub mod constants;

pub use errors::{classify, FailureKind, StravaError, StravaResult};
pub use models::{
    AspectType, ObjectType, Subscription, SubscriptionChallenge, TokenGrant, WebhookEvent,
};
