//! Error types for the task list client.
//!
//! # Design
//! `ApiError` is what the `TaskApi` parsers return. None of these ever reach
//! the user verbatim: the controller maps each failure onto one of the fixed
//! banner strings in `state`. The variants exist so logs and tests can tell
//! the failure modes apart.

use thiserror::Error;

/// Errors returned by `TaskApi` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// A draft failed local validation; no request is built for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("title and description are required")]
pub struct ValidationError;
