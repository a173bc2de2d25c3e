//! Error types for the Flare API client.
//!
//! # Design
//! Every endpoint wraps its payload in a `{status, data, error}` envelope, so
//! the dominant failure is `RequestFailed`: the transport reported a non-2xx
//! status or the envelope status was not 200. It carries the envelope status
//! and the server's `error` text verbatim — the API does not distinguish
//! not-found from unauthorized beyond those two fields, and neither do we.

use thiserror::Error;

/// Errors returned by Flare client operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the call: transport status outside 2xx, or the
    /// response envelope carried a status other than 200. `message` is the
    /// envelope's `error` text, empty when the server supplied none.
    #[error("request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    /// The HTTP round-trip itself failed (connection, TLS, I/O).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),
}
