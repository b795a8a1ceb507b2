// ABOUTME: Strava client entry point wiring configuration, credentials, transport and engine
// ABOUTME: Hands out typed resources and performs the OAuth code exchange
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

use std::sync::Arc;

use strava_core::{StravaError, StravaResult, TokenGrant};
use tracing::info;

use crate::config::StravaConfig;
use crate::credentials::CredentialStore;
use crate::engine::RequestEngine;
use crate::oauth::{self, GrantType, TokenEndpoint};
use crate::resources::{ActivityResource, AthleteResource, WebhookResource};
use crate::transport::{build_client, HttpTransport, Transport};

/// Cheaply cloneable handle to one Strava connection
///
/// Clones share the credential holder, so a renewal performed through one
/// clone is visible to all of them.
#[derive(Debug, Clone)]
pub struct StravaClient {
    engine: Arc<RequestEngine>,
    config: Arc<StravaConfig>,
}

impl StravaClient {
    /// Create a client that talks to Strava over HTTP
    ///
    /// # Errors
    ///
    /// Returns the configuration validation error, if any
    pub fn new(config: StravaConfig) -> StravaResult<Self> {
        config.validate()?;
        let transport = HttpTransport::new(build_client(&config.http), &config.base_url);
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client on top of any transport
    ///
    /// # Errors
    ///
    /// Returns the configuration validation error, if any
    pub fn with_transport(config: StravaConfig, transport: Arc<dyn Transport>) -> StravaResult<Self> {
        config.validate()?;
        let engine = RequestEngine::new(
            transport,
            Arc::new(CredentialStore::new()),
            TokenEndpoint::from_config(&config),
            config.max_refresh_attempts,
        )?
        .with_backoff(config.backoff.policy());

        Ok(Self {
            engine: Arc::new(engine),
            config: Arc::new(config),
        })
    }

    /// Store tokens obtained elsewhere
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredential` if either token is empty
    pub async fn set_tokens(
        &self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> StravaResult<()> {
        self.engine.credentials().set(access_token, refresh_token).await
    }

    /// Shared credential holder
    #[must_use]
    pub fn credentials(&self) -> &CredentialStore {
        self.engine.credentials()
    }

    /// Configuration the client was built with
    #[must_use]
    pub fn config(&self) -> &StravaConfig {
        &self.config
    }

    /// Underlying request engine
    #[must_use]
    pub fn engine(&self) -> &RequestEngine {
        &self.engine
    }

    /// Activity operations
    #[must_use]
    pub fn activities(&self) -> ActivityResource<'_> {
        ActivityResource::new(&self.engine)
    }

    /// Athlete operations
    #[must_use]
    pub fn athlete(&self) -> AthleteResource<'_> {
        AthleteResource::new(&self.engine)
    }

    /// Push subscription operations
    #[must_use]
    pub fn webhooks(&self) -> WebhookResource<'_> {
        WebhookResource::new(&self.engine, &self.config.webhook)
    }

    /// URL of the Strava consent page
    ///
    /// # Errors
    ///
    /// See [`oauth::authorization_url`]
    pub fn authorization_url(&self, state: &str) -> StravaResult<String> {
        oauth::authorization_url(&self.config, state)
    }

    /// Trade a code or refresh token for a new token grant
    ///
    /// Stored credentials are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an empty code or unknown grant type
    /// (before any network call), `Unauthorized` if the token endpoint rejects
    /// the request, `InvalidResponse` when the grant lacks a token
    pub async fn exchange_token(&self, code: &str, grant_type: &str) -> StravaResult<TokenGrant> {
        let grant_type: GrantType = grant_type.parse()?;
        if code.is_empty() {
            return Err(StravaError::invalid_argument(format!(
                "{} must not be empty",
                grant_type.token_field()
            )));
        }

        let request = self
            .engine
            .token_endpoint()
            .exchange_request(grant_type, code);
        let body = self.engine.execute_unauthenticated(&request).await?;
        TokenGrant::from_json("token exchange", &body)
    }

    /// Exchange an authorization code and store the resulting tokens
    ///
    /// # Errors
    ///
    /// Same as [`Self::exchange_token`]
    pub async fn connect(&self, code: &str) -> StravaResult<TokenGrant> {
        let grant = self
            .exchange_token(code, GrantType::AuthorizationCode.as_str())
            .await?;
        self.set_tokens(grant.access_token.clone(), grant.refresh_token.clone())
            .await?;
        info!(athlete_id = ?grant.athlete_id(), "Connected Strava account");
        Ok(grant)
    }
}
