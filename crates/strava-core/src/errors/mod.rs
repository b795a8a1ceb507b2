// ABOUTME: Unified error taxonomy for the Strava API client
// ABOUTME: Caller errors, terminal HTTP failures, retry ceilings and decoding defects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

//! # Error Handling
//!
//! Every failure the client can produce is a variant of [`StravaError`]. Nothing
//! is fatal to the process: callers inspect the variant and decide, for example
//! prompting the user to reconnect on [`StravaError::MaxAttemptsExceeded`].
//!
//! Status codes are mapped to behavior in exactly one place, [`classify`].

mod status;

pub use status::{classify, FailureKind};

/// Result alias used across the workspace
pub type StravaResult<T> = Result<T, StravaError>;

/// Errors produced by the Strava client
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StravaError {
    /// Caller supplied a value that can never succeed (bad id, page, grant type)
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Why the argument was rejected
        reason: String,
    },

    /// A credential value was empty or did not match the expected value
    #[error("Invalid credential: {field} must be a non-empty, valid value")]
    InvalidCredential {
        /// Name of the offending credential field
        field: &'static str,
    },

    /// A required setting was neither passed in nor configured
    #[error("Missing configuration: {key}")]
    MissingConfiguration {
        /// Configuration key that is missing
        key: &'static str,
    },

    /// A configured value could not be parsed
    #[error("Invalid configuration for {key}: {reason}")]
    InvalidConfiguration {
        /// Configuration key holding the bad value
        key: &'static str,
        /// Parse failure description
        reason: String,
    },

    /// Remote API answered 400
    #[error("Bad request ({status}): {body}")]
    BadRequest {
        /// HTTP status returned
        status: u16,
        /// Raw response body for diagnostics
        body: String,
    },

    /// Remote API answered 404
    #[error("Resource not found ({status}): {body}")]
    NotFound {
        /// HTTP status returned
        status: u16,
        /// Raw response body for diagnostics
        body: String,
    },

    /// Remote API answered 429
    #[error("Rate limit exceeded ({status}): {body}")]
    RateLimited {
        /// HTTP status returned
        status: u16,
        /// Raw response body for diagnostics
        body: String,
    },

    /// Credentials were rejected by an endpoint that cannot renew them
    /// (the token endpoint itself)
    #[error("Credentials rejected ({status}): {body}")]
    Unauthorized {
        /// HTTP status returned
        status: u16,
        /// Raw response body for diagnostics
        body: String,
    },

    /// The renewal ceiling was reached while the API kept answering 401
    #[error("Maximum token refresh attempts exceeded after {attempts} renewals")]
    MaxAttemptsExceeded {
        /// Renewals performed before giving up
        attempts: u32,
    },

    /// The API stayed unavailable through every backoff retry
    #[error("Strava service unavailable after {attempts} attempts")]
    ServiceUnavailableExhausted {
        /// Total transport calls made, including the first
        attempts: u32,
    },

    /// Server error, unexpected status or no response at all
    #[error("Upstream failure ({kind}): status {}", display_status(.status))]
    UpstreamFailure {
        /// Classified failure category
        kind: FailureKind,
        /// HTTP status, `None` when the transport got no response
        status: Option<u16>,
        /// Raw body or transport error description
        body: String,
    },

    /// A successful response did not carry the shape the caller depends on
    #[error("Invalid response for {context}: {reason}")]
    InvalidResponse {
        /// Which operation was decoding
        context: &'static str,
        /// Decoder failure description
        reason: String,
    },
}

#[allow(clippy::ref_option)]
fn display_status(status: &Option<u16>) -> String {
    status.map_or_else(|| "no response".to_owned(), |code| code.to_string())
}

impl StravaError {
    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Create a decoding error for a successful response
    #[must_use]
    pub fn invalid_response(context: &'static str, reason: impl ToString) -> Self {
        Self::InvalidResponse {
            context,
            reason: reason.to_string(),
        }
    }

    /// HTTP status attached to this error, if the remote API answered
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest { status, .. }
            | Self::NotFound { status, .. }
            | Self::RateLimited { status, .. }
            | Self::Unauthorized { status, .. } => Some(*status),
            Self::UpstreamFailure { status, .. } => *status,
            Self::ServiceUnavailableExhausted { .. } => Some(503),
            _ => None,
        }
    }

    /// Whether the error was raised locally before any network call
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. }
                | Self::InvalidCredential { .. }
                | Self::MissingConfiguration { .. }
                | Self::InvalidConfiguration { .. }
        )
    }
}
