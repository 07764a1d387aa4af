//! Capability checker built from a fixed grant list.

use crate::{Grant, PermissionCatalog, Subject, UserRecord, derive_grants};
use serde_json::Value;
use std::fmt;

/// The value a capability query is made about.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// A bare subject tag.
    Tag(&'a str),
    /// An arbitrary object whose subject tag must be detected.
    Object(&'a Value),
}

impl<'a> From<&'a str> for Target<'a> {
    fn from(tag: &'a str) -> Self {
        Target::Tag(tag)
    }
}

impl<'a> From<&'a String> for Target<'a> {
    fn from(tag: &'a String) -> Self {
        Target::Tag(tag)
    }
}

impl<'a> From<&'a Subject> for Target<'a> {
    fn from(subject: &'a Subject) -> Self {
        Target::Tag(subject.as_str())
    }
}

impl<'a> From<&'a Value> for Target<'a> {
    fn from(value: &'a Value) -> Self {
        Target::Object(value)
    }
}

/// Maps a queried value to the subject tag used for grant matching.
///
/// Returning `None` means the subject is undetermined; no grant matches it.
pub trait SubjectResolver: Send + Sync {
    fn resolve(&self, target: &Target<'_>) -> Option<Subject>;
}

/// Default resolver: tags and JSON strings map to themselves, objects map
/// to their string `type` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeFieldResolver;

impl SubjectResolver for TypeFieldResolver {
    fn resolve(&self, target: &Target<'_>) -> Option<Subject> {
        match target {
            Target::Tag(tag) => Some(Subject::from(*tag)),
            Target::Object(Value::String(tag)) => Some(Subject::from(tag.as_str())),
            Target::Object(Value::Object(map)) => {
                map.get("type").and_then(Value::as_str).map(Subject::from)
            }
            Target::Object(_) => None,
        }
    }
}

impl<F> SubjectResolver for F
where
    F: Fn(&Target<'_>) -> Option<Subject> + Send + Sync,
{
    fn resolve(&self, target: &Target<'_>) -> Option<Subject> {
        self(target)
    }
}

/// Read-only capability checker.
///
/// Grants are scanned in order; there is no way to change them after
/// construction. Build a new `Ability` when the user changes.
pub struct Ability {
    grants: Vec<Grant>,
    resolver: Box<dyn SubjectResolver>,
}

impl Ability {
    /// Build a checker using [`TypeFieldResolver`].
    pub fn new(grants: Vec<Grant>) -> Self {
        Self::with_resolver(grants, TypeFieldResolver)
    }

    pub fn with_resolver(grants: Vec<Grant>, resolver: impl SubjectResolver + 'static) -> Self {
        Self {
            grants,
            resolver: Box::new(resolver),
        }
    }

    /// A checker that denies everything.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Derive grants for `user` with the default rules and build a checker.
    pub fn for_user(user: &UserRecord, catalog: &PermissionCatalog) -> Self {
        Self::new(derive_grants(user, catalog))
    }

    pub fn grants(&self) -> &[Grant] {
        &self.grants
    }

    /// Whether any grant permits `action` on `subject`.
    pub fn can<'a>(&self, action: &str, subject: impl Into<Target<'a>>) -> bool {
        self.relevant_grant(action, subject).is_some()
    }

    pub fn cannot<'a>(&self, action: &str, subject: impl Into<Target<'a>>) -> bool {
        !self.can(action, subject)
    }

    /// The first grant, in list order, that permits `action` on `subject`.
    pub fn relevant_grant<'a>(
        &self,
        action: &str,
        subject: impl Into<Target<'a>>,
    ) -> Option<&Grant> {
        let target = subject.into();
        let Some(tag) = self.resolver.resolve(&target) else {
            tracing::trace!(?target, "subject type undetermined");
            return None;
        };
        self.grants.iter().find(|g| g.covers(action, tag.as_str()))
    }
}

impl fmt::Debug for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ability")
            .field("grants", &self.grants)
            .finish_non_exhaustive()
    }
}

impl Default for Ability {
    fn default() -> Self {
        Self::empty()
    }
}
