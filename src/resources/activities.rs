// ABOUTME: Activity listing and lookup for the authenticated athlete
// ABOUTME: Returns Strava's JSON untouched; rejects non-positive ids and pages locally
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strava_core::constants::endpoints;
use strava_core::{StravaError, StravaResult};
use tracing::debug;

use crate::engine::RequestEngine;
use crate::transport::ApiRequest;

/// Default page size used by Strava
const DEFAULT_PER_PAGE: u32 = 30;

/// Paging and time window for `GET /athlete/activities`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityListParams {
    /// 1-based page number
    pub page: u32,
    /// Items per page
    pub per_page: u32,
    /// Only activities before this epoch second
    pub before: Option<i64>,
    /// Only activities after this epoch second
    pub after: Option<i64>,
}

impl Default for ActivityListParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            before: None,
            after: None,
        }
    }
}

impl ActivityListParams {
    /// First page with the given size
    #[must_use]
    pub fn with_per_page(per_page: u32) -> Self {
        Self {
            per_page,
            ..Self::default()
        }
    }

    fn validate(&self) -> StravaResult<()> {
        if self.page == 0 {
            return Err(StravaError::invalid_argument("page must be positive"));
        }
        if self.per_page == 0 {
            return Err(StravaError::invalid_argument("per_page must be positive"));
        }
        Ok(())
    }

    fn to_request(self) -> ApiRequest {
        let mut request = ApiRequest::get(endpoints::ATHLETE_ACTIVITIES)
            .query("page", self.page)
            .query("per_page", self.per_page);
        if let Some(before) = self.before {
            request = request.query("before", before);
        }
        if let Some(after) = self.after {
            request = request.query("after", after);
        }
        request
    }
}

/// Activity operations
#[derive(Debug, Clone, Copy)]
pub struct ActivityResource<'a> {
    engine: &'a RequestEngine,
}

impl<'a> ActivityResource<'a> {
    pub(crate) const fn new(engine: &'a RequestEngine) -> Self {
        Self { engine }
    }

    /// List the athlete's activities
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a zero page or page size, otherwise any
    /// engine failure
    pub async fn list_activities(&self, params: &ActivityListParams) -> StravaResult<Value> {
        params.validate()?;
        debug!(page = params.page, per_page = params.per_page, "Listing Strava activities");

        self.engine.execute(&params.to_request()).await
    }

    /// Fetch one activity by id
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for id 0, `NotFound` for an unknown id,
    /// otherwise any engine failure
    pub async fn get_activity(&self, id: u64) -> StravaResult<Value> {
        if id == 0 {
            return Err(StravaError::invalid_argument("activity id must be positive"));
        }
        let path = format!("{}/{id}", endpoints::ACTIVITIES);
        self.engine.execute(&ApiRequest::get(path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_request() {
        let request = ActivityListParams::default().to_request();
        assert_eq!(request.path(), "/athlete/activities");
        assert_eq!(
            request.query_params(),
            [
                ("page".to_owned(), "1".to_owned()),
                ("per_page".to_owned(), "30".to_owned())
            ]
        );
    }

    #[test]
    fn test_time_window_is_added_when_present() {
        let params = ActivityListParams {
            after: Some(1_700_000_000),
            ..ActivityListParams::with_per_page(10)
        };
        let request = params.to_request();
        assert!(request
            .query_params()
            .contains(&("after".to_owned(), "1700000000".to_owned())));
        assert!(!request.query_params().iter().any(|(k, _)| k == "before"));
    }

    #[test]
    fn test_zero_page_is_rejected() {
        let params = ActivityListParams {
            page: 0,
            ..ActivityListParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(StravaError::InvalidArgument { .. })
        ));
        assert!(ActivityListParams::with_per_page(0).validate().is_err());
    }
}
