// ABOUTME: Push subscription management: create, delete, list and local lookups
// ABOUTME: Missing callback URL or verify token is reported before anything is sent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

use serde_json::json;
use strava_core::constants::endpoints;
use strava_core::{StravaError, StravaResult, Subscription};
use tracing::info;

use crate::config::WebhookConfig;
use crate::engine::RequestEngine;
use crate::transport::ApiRequest;

/// Push subscription operations
///
/// Strava has no single-subscription endpoint, so every lookup lists all
/// subscriptions and filters locally.
#[derive(Debug, Clone, Copy)]
pub struct WebhookResource<'a> {
    engine: &'a RequestEngine,
    defaults: &'a WebhookConfig,
}

impl<'a> WebhookResource<'a> {
    pub(crate) const fn new(engine: &'a RequestEngine, defaults: &'a WebhookConfig) -> Self {
        Self { engine, defaults }
    }

    /// Register a push subscription
    ///
    /// Omitted arguments fall back to the configured webhook defaults.
    ///
    /// # Errors
    ///
    /// Returns `MissingConfiguration` when a value is neither passed nor
    /// configured, `InvalidResponse` if the reply is not a subscription,
    /// otherwise any engine failure
    pub async fn create_subscription(
        &self,
        callback_url: Option<&str>,
        verify_token: Option<&str>,
    ) -> StravaResult<Subscription> {
        let callback_url = resolve(callback_url, self.defaults.callback_url.as_deref())
            .ok_or(StravaError::MissingConfiguration {
                key: "webhook.callback_url",
            })?;
        let verify_token = resolve(verify_token, self.defaults.verify_token.as_deref())
            .ok_or(StravaError::MissingConfiguration {
                key: "webhook.verify_token",
            })?;

        let request = ApiRequest::post(endpoints::PUSH_SUBSCRIPTIONS).json(json!({
            "callback_url": callback_url,
            "verify_token": verify_token,
        }));
        let body = self.engine.execute(&request).await?;
        let subscription = Subscription::from_json(&body)?;

        info!(
            subscription_id = subscription.id,
            callback_url = %subscription.callback_url,
            "Created Strava push subscription"
        );
        Ok(subscription)
    }

    /// Remove a push subscription
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a zero id, `NotFound` for an unknown
    /// id, otherwise any engine failure
    pub async fn delete_subscription(&self, id: u64) -> StravaResult<bool> {
        if id == 0 {
            return Err(StravaError::invalid_argument(
                "subscription id must be positive",
            ));
        }
        let path = format!("{}/{id}", endpoints::PUSH_SUBSCRIPTIONS);
        self.engine.execute(&ApiRequest::delete(path)).await?;
        info!(subscription_id = id, "Deleted Strava push subscription");
        Ok(true)
    }

    /// All push subscriptions of the application
    ///
    /// # Errors
    ///
    /// Returns `InvalidResponse` if the reply is not an array of
    /// subscriptions, otherwise any engine failure
    pub async fn list_subscriptions(&self) -> StravaResult<Vec<Subscription>> {
        let body = self
            .engine
            .execute(&ApiRequest::get(endpoints::PUSH_SUBSCRIPTIONS))
            .await?;
        Subscription::list_from_json(&body)
    }

    /// Subscription with the given id, `None` when absent
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_subscriptions`]
    pub async fn find_subscription(&self, id: u64) -> StravaResult<Option<Subscription>> {
        Ok(self
            .list_subscriptions()
            .await?
            .into_iter()
            .find(|subscription| subscription.id == id))
    }

    /// First listed subscription, `None` when there are none
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_subscriptions`]
    pub async fn first_subscription(&self) -> StravaResult<Option<Subscription>> {
        Ok(self.list_subscriptions().await?.into_iter().next())
    }

    /// Whether any subscription is registered
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_subscriptions`]
    pub async fn subscriptions_exist(&self) -> StravaResult<bool> {
        Ok(!self.list_subscriptions().await?.is_empty())
    }
}

fn resolve<'v>(explicit: Option<&'v str>, default: Option<&'v str>) -> Option<&'v str> {
    explicit
        .filter(|value| !value.is_empty())
        .or_else(|| default.filter(|value| !value.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_value_wins() {
        assert_eq!(resolve(Some("a"), Some("b")), Some("a"));
    }

    #[test]
    fn test_empty_values_fall_back() {
        assert_eq!(resolve(Some(""), Some("b")), Some("b"));
        assert_eq!(resolve(None, Some("")), None);
        assert_eq!(resolve(None, None), None);
    }
}
