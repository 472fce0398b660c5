//! Error types for the posts client.
//!
//! # Design
//! `Http` and `Network` are the two transport failures a lifecycle can see.
//! Their `Display` output is what the lifecycle's error hook logs: the status
//! text for an HTTP error and a fixed `Network Error` for a failed round-trip
//! (the underlying cause is kept in the variant for debugging).

use thiserror::Error;

use crate::types::Field;

/// Errors produced while building requests, talking to the server, or
/// parsing responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status outside `200..=299`.
    #[error("{status_text}")]
    Http { status: u16, status_text: String },

    /// No response could be obtained.
    #[error("Network Error")]
    Network(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Invalid client configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown delete policy `{0}`, expected `eager` or `confirmed`")]
    UnknownDeletePolicy(String),

    #[error("base URL must not be empty")]
    EmptyBaseUrl,
}

/// A create submission with a blank field. The display text is the inline
/// message shown next to the form.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Fill in the Author field")]
    BlankAuthor,

    #[error("Fill in the Text field")]
    BlankText,
}

impl ValidationError {
    /// The form field that should receive focus.
    pub fn field(self) -> Field {
        match self {
            ValidationError::BlankAuthor => Field::Author,
            ValidationError::BlankText => Field::Text,
        }
    }
}
