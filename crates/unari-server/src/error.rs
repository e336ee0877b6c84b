//! Server error types.

use std::{io, path::PathBuf};

use thiserror::Error;
use unari_core::ConfigError;

/// Errors that can occur in the server.
///
/// Only configuration, host key and bind failures stop the process. Errors
/// inside one connection are logged and end that connection alone.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Invalid configuration (timezone, campus file, HTTP client).
    ///
    /// Fatal at startup. Fix configuration and restart.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Host key missing or unreadable.
    #[error(
        "cannot load host key {}: {reason} (create one with `ssh-keygen -t ed25519 -N \"\" -f {}`)",
        .path.display(),
        .path.display()
    )]
    HostKey {
        /// Configured key path.
        path: PathBuf,
        /// Loader error message.
        reason: String,
    },

    /// Listening socket could not be bound.
    #[error("cannot bind {addr}: {source}")]
    Bind {
        /// Requested `host:port`.
        addr: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Transport/network error after startup.
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),

    /// SSH protocol error on one connection.
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),
}
