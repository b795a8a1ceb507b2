// ABOUTME: Profile of the athlete the stored credentials belong to
// ABOUTME: Pass-through JSON of GET /athlete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

use serde_json::Value;
use strava_core::constants::endpoints;
use strava_core::StravaResult;

use crate::engine::RequestEngine;
use crate::transport::ApiRequest;

/// Athlete operations
#[derive(Debug, Clone, Copy)]
pub struct AthleteResource<'a> {
    engine: &'a RequestEngine,
}

impl<'a> AthleteResource<'a> {
    pub(crate) const fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    /// Fetch the authenticated athlete
    ///
    /// # Errors
    ///
    /// Returns any engine failure
    pub async fn get_athlete(&self) -> StravaResult<Value> {
        self.engine.execute(&ApiRequest::get(endpoints::ATHLETE)).await
    }
}
