//! Error types for the menu core.
//!
//! None of these are fatal to a running server. A failed fetch degrades to an
//! empty [`crate::MenuIndex`], and configuration errors only surface at
//! startup.

use thiserror::Error;

/// Failure to retrieve menu data from the upstream source.
///
/// `Clone` so the result of a fetch can travel inside an application event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request could not be sent or timed out.
    #[error("request failed: {0}")]
    Request(String),

    /// Upstream answered with a non-success status code.
    #[error("upstream returned status {0}")]
    Status(u16),

    /// The response body was not the expected shape.
    #[error("failed to decode menu data: {0}")]
    Decode(String),
}

/// Errors from building a [`crate::MenuIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// The source fetch failed. The index is empty, not absent.
    #[error("menu data unavailable: {0}")]
    DataUnavailable(#[from] FetchError),
}

/// Errors from loading configuration values owned by the core.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Campus file could not be read.
    #[error("failed to read campus file {path}: {source}")]
    Read {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Campus file is not valid JSON for a campus directory.
    #[error("invalid campus file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Campus directory violates an invariant (empty, duplicate names, ...).
    #[error("invalid campus directory: {0}")]
    Invalid(String),

    /// Timezone name is not in the IANA database.
    #[error("unknown timezone: {0}")]
    Timezone(String),
}
