// ABOUTME: OAuth commands for strava-cli
// ABOUTME: Prints the consent URL and exchanges codes for token grants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

use anyhow::Result;
use serde_json::json;
use strava_client::StravaClient;
use tracing::info;

use super::print_json;

/// Print the authorization URL
pub fn authorize_url(client: &StravaClient, state: &str) -> Result<()> {
    let url = client.authorization_url(state)?;
    println!("{url}");
    Ok(())
}

/// Exchange a code and print the resulting tokens
pub async fn exchange(client: &StravaClient, code: &str, grant_type: &str) -> Result<()> {
    let grant = client.exchange_token(code, grant_type).await?;
    info!(athlete_id = ?grant.athlete_id(), "Token exchange succeeded");

    print_json(&json!({
        "access_token": grant.access_token,
        "refresh_token": grant.refresh_token,
        "expires_at": grant.expires_at,
        "scope": grant.scope,
        "athlete_id": grant.athlete_id(),
    }))
}
