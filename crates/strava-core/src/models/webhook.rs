// ABOUTME: Webhook push event payload and subscription validation challenge
// ABOUTME: Decodes events Strava posts to the callback URL; no signature checks exist upstream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::errors::{StravaError, StravaResult};

/// What happened to the object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectType {
    /// Object created
    Create,
    /// Object changed
    Update,
    /// Object deleted
    Delete,
    /// Any aspect this client does not know about
    #[serde(other)]
    Unknown,
}

/// Kind of object the event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    /// An activity
    Activity,
    /// An athlete (profile changes, deauthorization)
    Athlete,
    /// Any object type this client does not know about
    #[serde(other)]
    Unknown,
}

/// Event pushed by Strava to a subscription callback URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Create, update or delete
    pub aspect_type: AspectType,
    /// Epoch seconds when the event occurred
    pub event_time: i64,
    /// Activity or athlete id
    pub object_id: u64,
    /// Activity or athlete
    pub object_type: ObjectType,
    /// Athlete who owns the object
    pub owner_id: u64,
    /// Subscription that delivered the event
    pub subscription_id: u64,
    /// Changed fields for update events
    #[serde(default)]
    pub updates: Option<Map<String, Value>>,
}

impl WebhookEvent {
    /// Decode a push payload
    ///
    /// # Errors
    ///
    /// Returns `InvalidResponse` if a required field is missing or malformed
    pub fn from_json(value: &Value) -> StravaResult<Self> {
        Self::deserialize(value).map_err(|e| StravaError::invalid_response("webhook event", e))
    }

    /// Event time as a UTC instant
    #[must_use]
    pub fn event_timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.event_time, 0)
    }

    /// Event concerns an activity
    #[must_use]
    pub fn is_activity_event(&self) -> bool {
        self.object_type == ObjectType::Activity
    }

    /// Event concerns an athlete
    #[must_use]
    pub fn is_athlete_event(&self) -> bool {
        self.object_type == ObjectType::Athlete
    }

    /// Object was created
    #[must_use]
    pub fn is_create(&self) -> bool {
        self.aspect_type == AspectType::Create
    }

    /// Object was updated
    #[must_use]
    pub fn is_update(&self) -> bool {
        self.aspect_type == AspectType::Update
    }

    /// Object was deleted
    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.aspect_type == AspectType::Delete
    }

    /// Athlete revoked this application's access
    ///
    /// Strava signals this as an athlete update with `authorized: "false"`.
    #[must_use]
    pub fn is_deauthorization(&self) -> bool {
        if !(self.is_update() && self.is_athlete_event()) {
            return false;
        }
        self.updates
            .as_ref()
            .and_then(|updates| updates.get("authorized"))
            .is_some_and(|authorized| {
                authorized.as_str() == Some("false") || authorized.as_bool() == Some(false)
            })
    }
}

/// Validation request Strava sends (as GET query parameters) when a
/// subscription is created
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubscriptionChallenge {
    /// Always "subscribe"
    #[serde(rename = "hub.mode", default)]
    pub mode: Option<String>,
    /// Token supplied when the subscription was requested
    #[serde(rename = "hub.verify_token")]
    pub verify_token: String,
    /// Opaque value to echo back
    #[serde(rename = "hub.challenge")]
    pub challenge: String,
}

impl SubscriptionChallenge {
    /// Build the echo body after checking the verify token
    ///
    /// # Errors
    ///
    /// Returns `MissingConfiguration` if no verify token is configured and
    /// `InvalidCredential` if the presented token does not match
    pub fn respond(&self, expected_verify_token: &str) -> StravaResult<Value> {
        if expected_verify_token.is_empty() {
            return Err(StravaError::MissingConfiguration {
                key: "webhook.verify_token",
            });
        }
        if self.verify_token != expected_verify_token {
            return Err(StravaError::InvalidCredential {
                field: "hub.verify_token",
            });
        }
        Ok(json!({ "hub.challenge": self.challenge }))
    }
}
