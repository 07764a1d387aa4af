//! CLI error types.

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// CLI errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The user record file does not exist.
    #[error("user record not found at {path}")]
    UserNotFound { path: PathBuf },

    /// A subject passed with `--object` is not valid JSON.
    #[error("invalid subject object: {0}")]
    InvalidObject(#[from] serde_json::Error),

    /// Configuration is invalid or could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An error occurred in the acl layer.
    #[error(transparent)]
    Acl(#[from] acl::Error),

    /// An error occurred in the session layer.
    #[error(transparent)]
    Session(#[from] session::Error),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
