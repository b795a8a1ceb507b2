// ABOUTME: Authoritative mapping from HTTP status codes to failure categories
// ABOUTME: The only status table in the workspace; the engine branches on its output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 The strava_client authors

use std::fmt;

/// Category of a failed call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// 401, access token expired or missing
    Unauthorized,
    /// 404
    NotFound,
    /// 400
    BadRequest,
    /// 429
    RateLimited,
    /// 503
    ServiceUnavailable,
    /// 500, 502, 504
    ServerError,
    /// No HTTP response (DNS, connect, timeout, reset)
    NetworkFailure,
    /// Any other non-2xx status
    Unclassified,
}

impl FailureKind {
    /// Stable lowercase label used in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::BadRequest => "bad_request",
            Self::RateLimited => "rate_limited",
            Self::ServiceUnavailable => "service_unavailable",
            Self::ServerError => "server_error",
            Self::NetworkFailure => "network_failure",
            Self::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an HTTP status code
///
/// Returns `None` for 2xx (not a failure).
#[must_use]
pub const fn classify(status: u16) -> Option<FailureKind> {
    match status {
        200..=299 => None,
        400 => Some(FailureKind::BadRequest),
        401 => Some(FailureKind::Unauthorized),
        404 => Some(FailureKind::NotFound),
        429 => Some(FailureKind::RateLimited),
        503 => Some(FailureKind::ServiceUnavailable),
        500 | 502 | 504 => Some(FailureKind::ServerError),
        _ => Some(FailureKind::Unclassified),
    }
}
