// ABOUTME: Constants for Strava endpoints, retry policy, and configuration keys
// ABOUTME: Pure data grouped by domain so every component reads the same values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

/// Default Strava endpoints
pub mod endpoints {
    /// REST API base URL
    pub const API_BASE_URL: &str = "https://www.strava.com/api/v3";
    /// OAuth authorization page
    pub const AUTHORIZE_URL: &str = "https://www.strava.com/oauth/authorize";
    /// OAuth token exchange endpoint
    pub const TOKEN_URL: &str = "https://www.strava.com/oauth/token";
    /// Default OAuth scope requested during authorization
    pub const DEFAULT_SCOPE: &str = "read,activity:read_all";

    /// Athlete activity listing
    pub const ATHLETE_ACTIVITIES: &str = "/athlete/activities";
    /// Authenticated athlete profile
    pub const ATHLETE: &str = "/athlete";
    /// Activity detail prefix
    pub const ACTIVITIES: &str = "/activities";
    /// Webhook push subscriptions
    pub const PUSH_SUBSCRIPTIONS: &str = "/push_subscriptions";
}

/// OAuth grant types accepted by the token endpoint
pub mod grant_types {
    /// Initial exchange of an authorization code
    pub const AUTHORIZATION_CODE: &str = "authorization_code";
    /// Renewal of an access token
    pub const REFRESH_TOKEN: &str = "refresh_token";
}

/// Retry and renewal limits
pub mod retry {
    /// Maximum 503-triggered retries within one call
    pub const MAX_BACKOFF_RETRIES: u32 = 3;
    /// First backoff delay; doubles on each retry (1s, 2s, 4s)
    pub const BASE_BACKOFF_DELAY_MS: u64 = 1000;
    /// Default ceiling for 401-triggered credential renewals within one call
    pub const DEFAULT_MAX_REFRESH_ATTEMPTS: u32 = 3;
}

/// HTTP client defaults
pub mod http {
    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Default connection timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Content type sent and accepted on every call
    pub const JSON_CONTENT_TYPE: &str = "application/json";
}

/// Environment variable names read by `StravaConfig::from_env`
pub mod env_keys {
    /// OAuth client id
    pub const CLIENT_ID: &str = "STRAVA_CLIENT_ID";
    /// OAuth client secret
    pub const CLIENT_SECRET: &str = "STRAVA_CLIENT_SECRET";
    /// REST API base URL override
    pub const BASE_URL: &str = "STRAVA_BASE_URL";
    /// Authorization page override
    pub const AUTHORIZE_URL: &str = "STRAVA_AUTHORIZE_URL";
    /// Token endpoint override
    pub const TOKEN_URL: &str = "STRAVA_TOKEN_URL";
    /// OAuth redirect URI registered with Strava
    pub const REDIRECT_URI: &str = "STRAVA_REDIRECT_URI";
    /// Requested OAuth scope
    pub const SCOPE: &str = "STRAVA_CLIENT_SCOPE";
    /// Renewal ceiling per call
    pub const MAX_REFRESH_ATTEMPTS: &str = "STRAVA_CLIENT_MAX_REFRESH_ATTEMPTS";
    /// Default webhook callback URL
    pub const WEBHOOK_CALLBACK_URL: &str = "STRAVA_WEBHOOK_CALLBACK_URL";
    /// Default webhook verify token
    pub const WEBHOOK_VERIFY_TOKEN: &str = "STRAVA_WEBHOOK_VERIFY_TOKEN";
    /// Request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "STRAVA_HTTP_TIMEOUT_SECS";
    /// Connect timeout in seconds
    pub const HTTP_CONNECT_TIMEOUT_SECS: &str = "STRAVA_HTTP_CONNECT_TIMEOUT_SECS";
    /// Stored access token used by the CLI
    pub const ACCESS_TOKEN: &str = "STRAVA_ACCESS_TOKEN";
    /// Stored refresh token used by the CLI
    pub const REFRESH_TOKEN: &str = "STRAVA_REFRESH_TOKEN";
}
