//! User provider trait.

use crate::ProviderError;
use acl::UserRecord;

/// Source of the current user record.
///
/// This is the boundary to whatever authenticates the user (token decoding,
/// a user-info endpoint). `Ok(None)` means nobody is signed in.
pub trait UserProvider {
    fn current_user(&self) -> Result<Option<UserRecord>, ProviderError>;
}

impl<F> UserProvider for F
where
    F: Fn() -> Result<Option<UserRecord>, ProviderError>,
{
    fn current_user(&self) -> Result<Option<UserRecord>, ProviderError> {
        self()
    }
}
