//! ACL error types.
//!
//! Deriving grants and answering `can` never fail. These errors only come
//! from loading configuration data and from enforcing a [`Gate`](crate::Gate).

use thiserror::Error;

/// ACL errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A gate was evaluated against a checker that does not cover it.
    #[error("access denied: cannot {action} {subject}")]
    Denied { action: String, subject: String },

    /// Catalog or rule data is structurally invalid.
    #[error("invalid acl data: {0}")]
    Invalid(String),

    /// Failed to parse a catalog, rule set or user record.
    #[error("failed to parse acl data: {0}")]
    Parse(String),

    /// An I/O error occurred while reading a catalog.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
