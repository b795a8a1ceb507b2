// ABOUTME: Strava CLI - command-line access to activities, athlete and push subscriptions
// ABOUTME: Handles OAuth authorization, token exchange and resource queries with automatic renewal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors
//!
//! Usage:
//! ```bash
//! # Print the consent page URL
//! strava-cli authorize-url --state xyz
//!
//! # Exchange the code Strava redirected back with
//! strava-cli exchange --code abc123
//!
//! # List recent activities (tokens from STRAVA_ACCESS_TOKEN / STRAVA_REFRESH_TOKEN)
//! strava-cli activities --per-page 10
//!
//! # Manage push subscriptions
//! strava-cli subscriptions create --callback-url https://example.com/webhook --verify-token s3cret
//! strava-cli subscriptions list
//! ```

mod commands;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use strava_client::{config::StravaConfig, constants::env_keys, logging::LoggingConfig, StravaClient};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "strava-cli",
    about = "Strava API command-line client",
    long_about = "Command-line access to the Strava API with automatic token refresh and retry on outages."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Access token override
    #[arg(long, global = true, env = env_keys::ACCESS_TOKEN, hide_env_values = true)]
    access_token: Option<String>,

    /// Refresh token override
    #[arg(long, global = true, env = env_keys::REFRESH_TOKEN, hide_env_values = true)]
    refresh_token: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Print the OAuth authorization URL
    AuthorizeUrl {
        /// Opaque state echoed back on the redirect
        #[arg(long)]
        state: String,
    },

    /// Exchange an authorization code or refresh token for new tokens
    Exchange {
        /// Authorization code or refresh token
        #[arg(long)]
        code: String,

        /// Grant type (`authorization_code` or `refresh_token`)
        #[arg(long, default_value = "authorization_code")]
        grant_type: String,
    },

    /// List the athlete's activities
    Activities {
        /// Page number
        #[arg(long, default_value = "1")]
        page: u32,

        /// Activities per page
        #[arg(long, default_value = "30")]
        per_page: u32,

        /// Only activities before this epoch second
        #[arg(long)]
        before: Option<i64>,

        /// Only activities after this epoch second
        #[arg(long)]
        after: Option<i64>,
    },

    /// Show one activity
    Activity {
        /// Activity id
        id: u64,
    },

    /// Show the authenticated athlete
    Athlete,

    /// Push subscription management commands
    Subscriptions {
        #[command(subcommand)]
        action: SubscriptionCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum SubscriptionCommand {
    /// List push subscriptions
    List,

    /// Create a push subscription
    Create {
        /// Callback URL (defaults to `STRAVA_WEBHOOK_CALLBACK_URL`)
        #[arg(long)]
        callback_url: Option<String>,

        /// Verify token (defaults to `STRAVA_WEBHOOK_VERIFY_TOKEN`)
        #[arg(long)]
        verify_token: Option<String>,
    },

    /// Delete a push subscription
    Delete {
        /// Subscription id
        id: u64,
    },

    /// Show one push subscription
    Find {
        /// Subscription id
        id: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    logging.init()?;

    let client = StravaClient::new(StravaConfig::from_env()?)?;
    if let Some((access, refresh)) = stored_tokens(cli.access_token, cli.refresh_token)? {
        client.set_tokens(access, refresh).await?;
        info!("Using stored Strava tokens");
    }

    match cli.command {
        Command::AuthorizeUrl { state } => commands::oauth::authorize_url(&client, &state)?,
        Command::Exchange { code, grant_type } => {
            commands::oauth::exchange(&client, &code, &grant_type).await?;
        }
        Command::Activities {
            page,
            per_page,
            before,
            after,
        } => commands::activities::list(&client, page, per_page, before, after).await?,
        Command::Activity { id } => commands::activities::show(&client, id).await?,
        Command::Athlete => commands::activities::athlete(&client).await?,
        Command::Subscriptions { action } => match action {
            SubscriptionCommand::List => commands::subscriptions::list(&client).await?,
            SubscriptionCommand::Create {
                callback_url,
                verify_token,
            } => {
                commands::subscriptions::create(
                    &client,
                    callback_url.as_deref(),
                    verify_token.as_deref(),
                )
                .await?;
            }
            SubscriptionCommand::Delete { id } => {
                commands::subscriptions::delete(&client, id).await?;
            }
            SubscriptionCommand::Find { id } => commands::subscriptions::find(&client, id).await?,
        },
    }

    Ok(())
}

/// Tokens come as a pair; one without the other is a usage error
fn stored_tokens(
    access_token: Option<String>,
    refresh_token: Option<String>,
) -> Result<Option<(String, String)>> {
    match (access_token, refresh_token) {
        (Some(access), Some(refresh)) => Ok(Some((access, refresh))),
        (None, None) => Ok(None),
        (Some(_), None) => bail!(
            "--access-token was given without --refresh-token (or {})",
            env_keys::REFRESH_TOKEN
        ),
        (None, Some(_)) => bail!(
            "--refresh-token was given without --access-token (or {})",
            env_keys::ACCESS_TOKEN
        ),
    }
}
