// ABOUTME: Access/refresh credential pair and the shared holder the engine mutates on renewal
// ABOUTME: Writes replace both tokens atomically; renewals are serialized by a dedicated lock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

use std::fmt;

use strava_core::{StravaError, StravaResult};
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::debug;

use crate::transport::ApiRequest;

/// Short-lived access token plus the refresh token that renews it
///
/// An empty pair means "not connected yet": calls go out without an
/// `Authorization` header and Strava answers 401.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialPair {
    access_token: String,
    refresh_token: String,
}

impl CredentialPair {
    /// Create a pair, rejecting empty values
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredential` naming the first empty field
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> StravaResult<Self> {
        let access_token = access_token.into();
        let refresh_token = refresh_token.into();

        if access_token.is_empty() {
            return Err(StravaError::InvalidCredential {
                field: "access_token",
            });
        }
        if refresh_token.is_empty() {
            return Err(StravaError::InvalidCredential {
                field: "refresh_token",
            });
        }

        Ok(Self {
            access_token,
            refresh_token,
        })
    }

    /// Current access token (empty when not connected)
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Current refresh token (empty when not connected)
    #[must_use]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// Whether an access token is present
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// Attach the access token as a bearer `Authorization` header
    ///
    /// Without an access token the request is returned unchanged.
    #[must_use]
    pub fn authorize(&self, request: ApiRequest) -> ApiRequest {
        if self.access_token.is_empty() {
            return request;
        }
        request.header("Authorization", format!("Bearer {}", self.access_token))
    }
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |token: &str| if token.is_empty() { "" } else { "[REDACTED]" };
        f.debug_struct("CredentialPair")
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .finish()
    }
}

/// Shared, lock-guarded credential holder
///
/// Concurrent calls read snapshots; a renewal holds the renewal lock for the
/// whole exchange so two callers never race their writes.
#[derive(Debug, Default)]
pub struct CredentialStore {
    pair: RwLock<CredentialPair>,
    renewal: Mutex<()>,
}

impl CredentialStore {
    /// Create an empty holder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a holder with initial tokens
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredential` if either token is empty
    pub fn with_tokens(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> StravaResult<Self> {
        let pair = CredentialPair::new(access_token, refresh_token)?;
        Ok(Self {
            pair: RwLock::new(pair),
            renewal: Mutex::new(()),
        })
    }

    /// Replace both tokens
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredential` if either token is empty; the stored pair is
    /// left untouched in that case
    pub async fn set(
        &self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> StravaResult<()> {
        let pair = CredentialPair::new(access_token, refresh_token)?;
        *self.pair.write().await = pair;
        debug!("Strava credentials replaced");
        Ok(())
    }

    /// Copy of the current pair
    pub async fn snapshot(&self) -> CredentialPair {
        self.pair.read().await.clone()
    }

    /// Attach the current access token to a request
    pub async fn authorize(&self, request: ApiRequest) -> ApiRequest {
        self.pair.read().await.authorize(request)
    }

    /// Enter the renewal critical section
    pub(crate) async fn lock_renewal(&self) -> MutexGuard<'_, ()> {
        self.renewal.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_are_rejected() {
        assert!(matches!(
            CredentialPair::new("", "refresh"),
            Err(StravaError::InvalidCredential {
                field: "access_token"
            })
        ));
        assert!(matches!(
            CredentialPair::new("access", ""),
            Err(StravaError::InvalidCredential {
                field: "refresh_token"
            })
        ));
    }

    #[test]
    fn test_authorize_attaches_bearer_header() {
        let pair = CredentialPair::new("abc", "def").unwrap();
        let request = pair.authorize(ApiRequest::get("/athlete"));
        assert_eq!(request.bearer_token(), Some("abc"));
    }

    #[test]
    fn test_unauthenticated_pair_leaves_request_untouched() {
        let request = CredentialPair::default().authorize(ApiRequest::get("/athlete"));
        assert_eq!(request.header_value("Authorization"), None);
    }

    #[test]
    fn test_debug_output_redacts_tokens() {
        let pair = CredentialPair::new("top-secret", "also-secret").unwrap();
        let rendered = format!("{pair:?}");
        assert!(!rendered.contains("top-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn test_failed_set_keeps_previous_pair() {
        let store = CredentialStore::with_tokens("old-access", "old-refresh").unwrap();
        assert!(store.set("", "new-refresh").await.is_err());

        let pair = store.snapshot().await;
        assert_eq!(pair.access_token(), "old-access");
        assert_eq!(pair.refresh_token(), "old-refresh");
    }

    #[tokio::test]
    async fn test_set_replaces_both_tokens() {
        let store = CredentialStore::new();
        store.set("new-access", "new-refresh").await.unwrap();

        let request = store.authorize(ApiRequest::get("/athlete")).await;
        assert_eq!(request.bearer_token(), Some("new-access"));
        assert_eq!(store.snapshot().await.refresh_token(), "new-refresh");
    }
}
