// ABOUTME: Webhook push subscription record and its JSON codec
// ABOUTME: Decodes create/list responses into immutable Subscription values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::timestamp;
use crate::errors::{StravaError, StravaResult};

/// A Strava webhook push subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription id assigned by Strava
    pub id: u64,
    /// URL receiving push events
    pub callback_url: String,
    /// Creation time
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
    /// Last modification time
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// Decode a single subscription object (create response or list element)
    ///
    /// # Errors
    ///
    /// Returns `InvalidResponse` if a required field is missing or malformed
    pub fn from_json(value: &Value) -> StravaResult<Self> {
        Self::deserialize(value).map_err(|e| StravaError::invalid_response("subscription", e))
    }

    /// Decode the array returned by the subscription listing endpoint
    ///
    /// # Errors
    ///
    /// Returns `InvalidResponse` if the value is not an array or any element
    /// fails to decode
    pub fn list_from_json(value: &Value) -> StravaResult<Vec<Self>> {
        let items = value.as_array().ok_or_else(|| {
            StravaError::invalid_response("subscription list", "expected a JSON array")
        })?;
        items.iter().map(Self::from_json).collect()
    }

    /// Encode back to the wire shape, timestamps as RFC 3339
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "id": self.id,
            "callback_url": self.callback_url,
            "created_at": self.created_at.to_rfc3339(),
            "updated_at": self.updated_at.to_rfc3339(),
        })
    }
}
