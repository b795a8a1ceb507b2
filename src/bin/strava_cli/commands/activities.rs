// ABOUTME: Activity and athlete commands for strava-cli
// ABOUTME: Prints Strava's JSON as returned
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

use anyhow::Result;
use strava_client::{ActivityListParams, StravaClient};

use super::print_json;

/// List activities
pub async fn list(
    client: &StravaClient,
    page: u32,
    per_page: u32,
    before: Option<i64>,
    after: Option<i64>,
) -> Result<()> {
    let params = ActivityListParams {
        page,
        per_page,
        before,
        after,
    };
    let activities = client.activities().list_activities(&params).await?;
    print_json(&activities)
}

/// Show one activity
pub async fn show(client: &StravaClient, id: u64) -> Result<()> {
    let activity = client.activities().get_activity(id).await?;
    print_json(&activity)
}

/// Show the authenticated athlete
pub async fn athlete(client: &StravaClient) -> Result<()> {
    let athlete = client.athlete().get_athlete().await?;
    print_json(&athlete)
}
