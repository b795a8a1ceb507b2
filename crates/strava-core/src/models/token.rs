// ABOUTME: OAuth token grant returned by the Strava token endpoint
// ABOUTME: Requires both tokens so a renewal can never half-update stored credentials
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{StravaError, StravaResult};

/// Tokens minted by an authorization-code exchange or a renewal
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenGrant {
    /// Usually "Bearer"
    #[serde(default)]
    pub token_type: Option<String>,
    /// Short-lived access token
    pub access_token: String,
    /// Long-lived refresh token
    pub refresh_token: String,
    /// Expiry as epoch seconds
    #[serde(default)]
    pub expires_at: Option<i64>,
    /// Seconds until expiry
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Granted scope
    #[serde(default)]
    pub scope: Option<String>,
    /// Summary athlete, present on authorization-code exchanges
    #[serde(default)]
    pub athlete: Option<Value>,
}

impl TokenGrant {
    /// Decode a token endpoint response
    ///
    /// # Errors
    ///
    /// Returns `InvalidResponse` when `access_token` or `refresh_token` is
    /// missing, not a string, or empty
    pub fn from_json(context: &'static str, value: &Value) -> StravaResult<Self> {
        let grant =
            Self::deserialize(value).map_err(|e| StravaError::invalid_response(context, e))?;

        if grant.access_token.is_empty() {
            return Err(StravaError::invalid_response(context, "empty access_token"));
        }
        if grant.refresh_token.is_empty() {
            return Err(StravaError::invalid_response(context, "empty refresh_token"));
        }
        Ok(grant)
    }

    /// Expiry instant, preferring the absolute `expires_at`
    #[must_use]
    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        self.expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .or_else(|| {
                self.expires_in
                    .map(|secs| Utc::now() + chrono::Duration::seconds(secs))
            })
    }

    /// Strava athlete id from the exchange payload, if present
    #[must_use]
    pub fn athlete_id(&self) -> Option<u64> {
        self.athlete.as_ref()?.get("id")?.as_u64()
    }
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("token_type", &self.token_type)
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_exchange_response() {
        let grant = TokenGrant::from_json(
            "token exchange",
            &json!({
                "token_type": "Bearer",
                "access_token": "a1b2c3",
                "refresh_token": "e5f6g7",
                "expires_at": 1_568_775_134,
                "expires_in": 21600,
                "scope": "read,activity:read",
                "athlete": {"id": 134_815, "firstname": "John"}
            }),
        )
        .unwrap();

        assert_eq!(grant.access_token, "a1b2c3");
        assert_eq!(grant.athlete_id(), Some(134_815));
        assert_eq!(grant.expiry().map(|t| t.timestamp()), Some(1_568_775_134));
    }

    #[test]
    fn test_missing_refresh_token_is_a_defect() {
        let err = TokenGrant::from_json("token renewal", &json!({"access_token": "new"}))
            .unwrap_err();
        assert!(matches!(
            err,
            StravaError::InvalidResponse {
                context: "token renewal",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_access_token_is_a_defect() {
        let err = TokenGrant::from_json(
            "token renewal",
            &json!({"access_token": "", "refresh_token": "r"}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("empty access_token"));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let grant = TokenGrant::from_json(
            "token renewal",
            &json!({"access_token": "secret-access", "refresh_token": "secret-refresh"}),
        )
        .unwrap();
        let rendered = format!("{grant:?}");
        assert!(!rendered.contains("secret-access"));
        assert!(!rendered.contains("secret-refresh"));
    }
}
