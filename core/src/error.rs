//! Error types for the railway API client.
//!
//! # Design
//! `RailwayError` separates failures detected locally (a blank parameter, an
//! operation the client does not implement yet) from failures reported by
//! the remote round trip, which are grouped in `ApiError`. The remote service
//! signals errors through the `response_code` body field, so `Unauthorized`,
//! `QuotaExhausted` and `Unexpected` are keyed on that field, never on the
//! HTTP status.

use serde_json::Value;
use thiserror::Error;

use crate::types::Operation;

/// Errors returned by `Railways` methods and `RailwayClient` build/parse.
#[derive(Debug, Error)]
pub enum RailwayError {
    /// A required parameter was blank. Raised before any network I/O.
    #[error("missing parameter `{parameter}` for {operation}")]
    MissingParameter {
        operation: Operation,
        parameter: &'static str,
    },

    /// A parameter name the operation does not take. Raised before any
    /// network I/O.
    #[error("unknown parameter `{parameter}` for {operation}")]
    UnknownParameter {
        operation: Operation,
        parameter: String,
    },

    /// The round trip failed or the service returned a non-success code.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The operation is part of the service contract but has no client
    /// implementation.
    #[error("{operation} is not implemented")]
    NotImplemented { operation: Operation },
}

/// Failures of the HTTP round trip or of the service itself.
#[derive(Debug, Error)]
pub enum ApiError {
    /// `response_code` 401.
    #[error("authentication error: unknown API key")]
    Unauthorized,

    /// `response_code` 403.
    #[error("quota exhausted for day")]
    QuotaExhausted,

    /// Any other `response_code`, including non-numeric ones.
    #[error("something went wrong (response code {code}), check all your calls and try again")]
    Unexpected { code: Value },

    /// DNS, connection, timeout or body read failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The body was not a JSON object, or it had no `response_code`.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    /// Whether repeating the same call could succeed.
    ///
    /// Only transport failures qualify. A 403 clears at the next quota day,
    /// which no retry loop should wait for.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl RailwayError {
    /// The underlying API error, if the failure came from the round trip.
    pub const fn api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}
