// ABOUTME: Client configuration injected at construction: OAuth app, endpoints, limits, webhook defaults
// ABOUTME: Loaded from STRAVA_* environment variables or built directly; validated before use
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

//! Configuration for the Strava client
//!
//! Nothing in the client reads the environment on its own. [`StravaConfig`] is
//! built once, either by hand or through [`StravaConfig::from_env`], and passed
//! to [`crate::StravaClient::new`].

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use strava_core::constants::{endpoints, env_keys, http, retry};
use strava_core::{StravaError, StravaResult};
use tracing::debug;

use crate::engine::BackoffPolicy;

/// Top-level client configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StravaConfig {
    /// OAuth application client id
    pub client_id: String,
    /// OAuth application client secret, never serialized
    #[serde(skip_serializing, default)]
    pub client_secret: String,
    /// REST API base URL
    pub base_url: String,
    /// OAuth authorization page
    pub authorize_url: String,
    /// OAuth token endpoint
    pub token_url: String,
    /// Redirect URI registered with the OAuth application
    pub redirect_uri: Option<String>,
    /// Scope requested during authorization
    pub scope: String,
    /// Renewal ceiling per call, at least 1
    pub max_refresh_attempts: u32,
    /// Webhook subscription defaults
    pub webhook: WebhookConfig,
    /// HTTP client timeouts
    pub http: HttpClientConfig,
    /// 503 backoff tuning
    pub backoff: BackoffConfig,
}

/// Defaults used when creating push subscriptions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Callback URL Strava posts events to
    pub callback_url: Option<String>,
    /// Token echoed back during the subscription challenge
    pub verify_token: Option<String>,
}

/// HTTP client timeouts in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Whole-request timeout
    pub timeout_secs: u64,
    /// Connection establishment timeout
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: http::DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: http::DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Backoff base delay; the retry ceiling is fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Delay before the first 503 retry in milliseconds
    pub base_delay_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: retry::BASE_BACKOFF_DELAY_MS,
        }
    }
}

impl BackoffConfig {
    /// Policy the engine applies
    #[must_use]
    pub fn policy(&self) -> BackoffPolicy {
        BackoffPolicy::with_base_delay(Duration::from_millis(self.base_delay_ms))
    }
}

impl Default for StravaConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            base_url: endpoints::API_BASE_URL.to_owned(),
            authorize_url: endpoints::AUTHORIZE_URL.to_owned(),
            token_url: endpoints::TOKEN_URL.to_owned(),
            redirect_uri: None,
            scope: endpoints::DEFAULT_SCOPE.to_owned(),
            max_refresh_attempts: retry::DEFAULT_MAX_REFRESH_ATTEMPTS,
            webhook: WebhookConfig::default(),
            http: HttpClientConfig::default(),
            backoff: BackoffConfig::default(),
        }
    }
}

impl std::fmt::Debug for StravaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StravaConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("authorize_url", &self.authorize_url)
            .field("token_url", &self.token_url)
            .field("redirect_uri", &self.redirect_uri)
            .field("scope", &self.scope)
            .field("max_refresh_attempts", &self.max_refresh_attempts)
            .field("webhook", &self.webhook)
            .field("http", &self.http)
            .field("backoff", &self.backoff)
            .finish()
    }
}

impl StravaConfig {
    /// Configuration for an OAuth application with default endpoints
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            ..Self::default()
        }
    }

    /// Load configuration from `STRAVA_*` environment variables
    ///
    /// Unset or empty variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` when a numeric variable does not parse
    pub fn from_env() -> StravaResult<Self> {
        let defaults = Self::default();

        let config = Self {
            client_id: env_string(env_keys::CLIENT_ID).unwrap_or_default(),
            client_secret: env_string(env_keys::CLIENT_SECRET).unwrap_or_default(),
            base_url: env_string(env_keys::BASE_URL).unwrap_or(defaults.base_url),
            authorize_url: env_string(env_keys::AUTHORIZE_URL).unwrap_or(defaults.authorize_url),
            token_url: env_string(env_keys::TOKEN_URL).unwrap_or(defaults.token_url),
            redirect_uri: env_string(env_keys::REDIRECT_URI),
            scope: env_string(env_keys::SCOPE).unwrap_or(defaults.scope),
            max_refresh_attempts: env_parse(env_keys::MAX_REFRESH_ATTEMPTS)?
                .unwrap_or(defaults.max_refresh_attempts),
            webhook: WebhookConfig {
                callback_url: env_string(env_keys::WEBHOOK_CALLBACK_URL),
                verify_token: env_string(env_keys::WEBHOOK_VERIFY_TOKEN),
            },
            http: HttpClientConfig {
                timeout_secs: env_parse(env_keys::HTTP_TIMEOUT_SECS)?
                    .unwrap_or(defaults.http.timeout_secs),
                connect_timeout_secs: env_parse(env_keys::HTTP_CONNECT_TIMEOUT_SECS)?
                    .unwrap_or(defaults.http.connect_timeout_secs),
            },
            backoff: defaults.backoff,
        };

        debug!(
            base_url = %config.base_url,
            max_refresh_attempts = config.max_refresh_attempts,
            webhook_defaults = config.webhook.callback_url.is_some(),
            "Loaded Strava configuration from environment"
        );
        Ok(config)
    }

    /// Check invariants the engine relies on
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a zero renewal ceiling and
    /// `MissingConfiguration` for an empty base or token URL
    pub fn validate(&self) -> StravaResult<()> {
        if self.max_refresh_attempts < 1 {
            return Err(StravaError::invalid_argument(
                "max_refresh_attempts must be at least 1",
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(StravaError::MissingConfiguration { key: "base_url" });
        }
        if self.token_url.trim().is_empty() {
            return Err(StravaError::MissingConfiguration { key: "token_url" });
        }
        Ok(())
    }

    /// Set webhook defaults
    #[must_use]
    pub fn with_webhook(
        mut self,
        callback_url: impl Into<String>,
        verify_token: impl Into<String>,
    ) -> Self {
        self.webhook = WebhookConfig {
            callback_url: Some(callback_url.into()),
            verify_token: Some(verify_token.into()),
        };
        self
    }
}

fn env_string(key: &'static str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T>(key: &'static str) -> StravaResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_string(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| StravaError::InvalidConfiguration {
                    key,
                    reason: format!("'{raw}': {e}"),
                })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_strava() {
        let config = StravaConfig::default();
        assert_eq!(config.base_url, "https://www.strava.com/api/v3");
        assert_eq!(config.token_url, "https://www.strava.com/oauth/token");
        assert_eq!(config.max_refresh_attempts, 3);
        assert_eq!(config.backoff.policy(), BackoffPolicy::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serialized_config_omits_client_secret() {
        let config = StravaConfig::new("client-1", "top-secret");
        let value = serde_json::to_value(&config).unwrap();

        assert_eq!(value["client_id"], "client-1");
        assert!(value.get("client_secret").is_none());
        assert!(!value.to_string().contains("top-secret"));
    }

    #[test]
    fn test_zero_refresh_attempts_is_rejected() {
        let config = StravaConfig {
            max_refresh_attempts: 0,
            ..StravaConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StravaError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_empty_base_url_is_missing() {
        let config = StravaConfig {
            base_url: "  ".to_owned(),
            ..StravaConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StravaError::MissingConfiguration { key: "base_url" })
        ));
    }

    #[test]
    fn test_debug_redacts_client_secret() {
        let rendered = format!("{:?}", StravaConfig::new("123", "shh-secret"));
        assert!(rendered.contains("123"));
        assert!(!rendered.contains("shh-secret"));
    }
}
