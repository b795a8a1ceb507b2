// ABOUTME: OAuth token endpoint requests and the Strava authorization URL
// ABOUTME: Grant type selects the payload key; unknown grant types never reach the network
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use strava_core::constants::grant_types;
use strava_core::{StravaError, StravaResult};
use url::Url;

use crate::config::StravaConfig;
use crate::transport::ApiRequest;

/// Grant types accepted by the token endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
    /// Exchange an authorization code
    AuthorizationCode,
    /// Renew with a refresh token
    RefreshToken,
}

impl GrantType {
    /// Wire value of `grant_type`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthorizationCode => grant_types::AUTHORIZATION_CODE,
            Self::RefreshToken => grant_types::REFRESH_TOKEN,
        }
    }

    /// Body key carrying the code or token
    #[must_use]
    pub const fn token_field(self) -> &'static str {
        match self {
            Self::AuthorizationCode => "code",
            Self::RefreshToken => "refresh_token",
        }
    }
}

impl fmt::Display for GrantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrantType {
    type Err = StravaError;

    fn from_str(value: &str) -> StravaResult<Self> {
        match value {
            grant_types::AUTHORIZATION_CODE => Ok(Self::AuthorizationCode),
            grant_types::REFRESH_TOKEN => Ok(Self::RefreshToken),
            other => Err(StravaError::invalid_argument(format!(
                "unsupported grant_type '{other}', expected '{}' or '{}'",
                grant_types::AUTHORIZATION_CODE,
                grant_types::REFRESH_TOKEN
            ))),
        }
    }
}

/// Token endpoint location and the OAuth application credentials
#[derive(Clone, PartialEq, Eq)]
pub struct TokenEndpoint {
    url: String,
    client_id: String,
    client_secret: String,
}

impl fmt::Debug for TokenEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenEndpoint")
            .field("url", &self.url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}

impl TokenEndpoint {
    /// Create an endpoint description
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Endpoint described by the client configuration
    #[must_use]
    pub fn from_config(config: &StravaConfig) -> Self {
        Self::new(&config.token_url, &config.client_id, &config.client_secret)
    }

    /// Token endpoint URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// `POST` with `{client_id, client_secret, grant_type, code|refresh_token}`
    #[must_use]
    pub fn exchange_request(&self, grant_type: GrantType, token: &str) -> ApiRequest {
        let mut body = Map::new();
        body.insert("client_id".to_owned(), Value::from(self.client_id.as_str()));
        body.insert(
            "client_secret".to_owned(),
            Value::from(self.client_secret.as_str()),
        );
        body.insert("grant_type".to_owned(), Value::from(grant_type.as_str()));
        body.insert(grant_type.token_field().to_owned(), Value::from(token));

        ApiRequest::post(self.url.as_str()).json(Value::Object(body))
    }
}

/// Build the page a user visits to grant access
///
/// # Errors
///
/// Returns `MissingConfiguration` without a client id or redirect URI, and
/// `InvalidArgument` for an empty state or unparseable authorize URL
pub fn authorization_url(config: &StravaConfig, state: &str) -> StravaResult<String> {
    if config.client_id.is_empty() {
        return Err(StravaError::MissingConfiguration { key: "client_id" });
    }
    let redirect_uri = config
        .redirect_uri
        .as_deref()
        .filter(|uri| !uri.is_empty())
        .ok_or(StravaError::MissingConfiguration {
            key: "redirect_uri",
        })?;
    if state.is_empty() {
        return Err(StravaError::invalid_argument("state must not be empty"));
    }

    let mut url = Url::parse(&config.authorize_url).map_err(|e| {
        StravaError::invalid_argument(format!(
            "invalid authorize URL '{}': {e}",
            config.authorize_url
        ))
    })?;

    url.query_pairs_mut()
        .append_pair("client_id", &config.client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("response_type", "code")
        .append_pair("scope", &config.scope)
        .append_pair("state", state);

    Ok(url.to_string())
}
