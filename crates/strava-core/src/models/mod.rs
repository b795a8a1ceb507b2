// ABOUTME: Wire records decoded from Strava API responses and webhook push payloads
// ABOUTME: Subscription, webhook event, challenge and OAuth token grant value objects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

//! # Data Models
//!
//! Immutable value objects built from generic JSON. Each record is either fully
//! decoded or rejected with [`crate::StravaError::InvalidResponse`]; unknown
//! extra fields are ignored.

mod subscription;
mod timestamp;
mod token;
mod webhook;

pub use subscription::Subscription;
pub use token::TokenGrant;
pub use webhook::{AspectType, ObjectType, SubscriptionChallenge, WebhookEvent};
