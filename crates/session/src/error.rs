use thiserror::Error;

/// Failure reported by a [`UserProvider`](crate::UserProvider).
#[derive(Debug, Error)]
#[error("user provider failed: {0}")]
pub struct ProviderError(pub String);

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("no session established")]
    NotEstablished,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Acl(#[from] acl::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
