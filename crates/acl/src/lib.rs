//! Client-side authorization.
//!
//! Core principle: **a user's role data is turned into an ordered list of
//! `(action, subject)` grants, and every gate is answered from that list.**
//!
//! # Overview
//!
//! - [`RuleDeriver`] maps a [`UserRecord`] and a [`PermissionCatalog`] to
//!   grants. It never fails; unknown roles and identifiers yield nothing.
//! - [`Ability`] answers `can`/`cannot` over a fixed grant list. `manage`
//!   is the wildcard action and `all` the wildcard subject.
//! - [`Gate`] is the requirement a route or element declares.
//!
//! # Example
//!
//! ```
//! use acl::{Ability, Permission, PermissionCatalog, RoleEntry, UserRecord, derive_grants};
//!
//! let catalog = PermissionCatalog::new(vec![Permission::new(7, "read", "report")]);
//! let user = UserRecord::with_entries(vec![RoleEntry::with_permissions([7])]);
//!
//! let ability = Ability::new(derive_grants(&user, &catalog));
//! assert!(ability.can("read", "report"));
//! assert!(ability.can("read", "view-post"));
//! assert!(ability.cannot("delete", "report"));
//! ```

mod ability;
mod catalog;
mod derive;
mod error;
mod gate;
mod grant;
mod user;

pub use ability::{Ability, SubjectResolver, Target, TypeFieldResolver};
pub use catalog::{Permission, PermissionCatalog};
pub use derive::{RuleDeriver, Rules, derive_grants};
pub use error::{Error, Result};
pub use gate::{Decision, Gate};
pub use grant::{Action, Grant, Subject};
pub use user::{Role, RoleEntry, UserRecord};
