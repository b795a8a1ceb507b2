// ABOUTME: Push subscription commands for strava-cli
// ABOUTME: Handles list, create, delete and find operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

use anyhow::{bail, Result};
use serde_json::json;
use strava_client::StravaClient;
use tracing::{info, warn};

use super::print_json;

/// List push subscriptions
pub async fn list(client: &StravaClient) -> Result<()> {
    let subscriptions = client.webhooks().list_subscriptions().await?;
    info!(count = subscriptions.len(), "Listed push subscriptions");
    print_json(&subscriptions)
}

/// Create a push subscription
pub async fn create(
    client: &StravaClient,
    callback_url: Option<&str>,
    verify_token: Option<&str>,
) -> Result<()> {
    let subscription = client
        .webhooks()
        .create_subscription(callback_url, verify_token)
        .await?;
    print_json(&subscription)
}

/// Delete a push subscription
pub async fn delete(client: &StravaClient, id: u64) -> Result<()> {
    let deleted = client.webhooks().delete_subscription(id).await?;
    print_json(&json!({ "id": id, "deleted": deleted }))
}

/// Show one push subscription
pub async fn find(client: &StravaClient, id: u64) -> Result<()> {
    match client.webhooks().find_subscription(id).await? {
        Some(subscription) => print_json(&subscription),
        None => {
            warn!(subscription_id = id, "Push subscription not found");
            bail!("No push subscription with id {id}")
        }
    }
}
