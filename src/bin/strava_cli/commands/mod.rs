// ABOUTME: Command modules for strava-cli
// ABOUTME: OAuth, activity and push subscription commands plus shared output helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

pub mod activities;
pub mod oauth;
pub mod subscriptions;

use anyhow::{Context, Result};
use serde::Serialize;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON output")?;
    println!("{rendered}");
    Ok(())
}
