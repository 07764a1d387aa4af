//! Session-scoped authorization context.
//!
//! A [`SessionContext`] owns the current user and the [`acl::Ability`]
//! derived for them. It is passed explicitly to whatever renders or routes,
//! and it is the only writer of authorization state: login, refresh and
//! logout each replace the whole snapshot.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use acl::{Gate, PermissionCatalog, RuleDeriver, UserRecord};
//! use session::SessionContext;
//!
//! let ctx = SessionContext::new(RuleDeriver::default(), Arc::new(PermissionCatalog::empty()));
//! ctx.establish(UserRecord::tagged("member"));
//!
//! assert!(ctx.can("read", "member-page"));
//! assert!(ctx.require(&Gate::new("update", "member-page")).is_err());
//!
//! ctx.logout();
//! assert!(ctx.cannot("read", "member-page"));
//! ```

mod context;
mod error;
mod id;
mod provider;

pub use context::{ActiveSession, SessionContext, Snapshot};
pub use error::{Error, ProviderError, Result};
pub use id::SessionId;
pub use provider::UserProvider;
