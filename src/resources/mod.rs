// ABOUTME: Typed Strava resource operations built on the request engine
// ABOUTME: Each operation validates its inputs, supplies a request builder and decodes the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

mod activities;
mod athlete;
mod webhooks;

pub use activities::{ActivityListParams, ActivityResource};
pub use athlete::AthleteResource;
pub use webhooks::WebhookResource;
