//! Grant, action and subject types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An operation a grant permits.
///
/// `Manage` is the wildcard action: a grant carrying it covers every action.
/// Catalogs may define actions outside the built-in set; those are kept
/// verbatim in `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    Manage,
    Create,
    Read,
    Update,
    Delete,
    Custom(String),
}

impl Action {
    pub fn as_str(&self) -> &str {
        match self {
            Action::Manage => "manage",
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Custom(name) => name,
        }
    }

    /// Whether this action is the `manage` wildcard.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Action::Manage)
    }
}

impl From<&str> for Action {
    fn from(s: &str) -> Self {
        match s {
            "manage" => Action::Manage,
            "create" => Action::Create,
            "read" => Action::Read,
            "update" => Action::Update,
            "delete" => Action::Delete,
            other => Action::Custom(other.to_string()),
        }
    }
}

impl From<String> for Action {
    fn from(s: String) -> Self {
        match Action::from(s.as_str()) {
            Action::Custom(_) => Action::Custom(s),
            builtin => builtin,
        }
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        match action {
            Action::Custom(name) => name,
            builtin => builtin.as_str().to_string(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// The resource tag a grant applies to.
///
/// Free-form; `"all"` is the wildcard subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subject(String);

impl Subject {
    /// The wildcard subject tag.
    pub const ALL: &'static str = "all";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn all() -> Self {
        Self::new(Self::ALL)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.0 == Self::ALL
    }
}

impl From<&str> for Subject {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Subject {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Subject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// A permitted `(action, subject)` capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grant {
    pub action: Action,
    pub subject: Subject,
}

impl Grant {
    pub fn new(action: impl Into<Action>, subject: impl Into<Subject>) -> Self {
        Self {
            action: action.into(),
            subject: subject.into(),
        }
    }

    /// Whether this grant permits `action` on the subject tagged `subject`.
    ///
    /// `manage` matches any action and `all` matches any subject.
    pub fn covers(&self, action: &str, subject: &str) -> bool {
        let action_ok = self.action.is_wildcard() || self.action.as_str() == action;
        let subject_ok = self.subject.is_wildcard() || self.subject.as_str() == subject;
        action_ok && subject_ok
    }
}

impl fmt::Display for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.action, self.subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_parses_builtins_and_custom() {
        assert_eq!(Action::from("read"), Action::Read);
        assert_eq!(Action::from("manage"), Action::Manage);
        assert_eq!(
            Action::from("approve".to_string()),
            Action::Custom("approve".into())
        );
        assert_eq!(String::from(Action::Custom("approve".into())), "approve");
    }

    #[test]
    fn test_action_serde_is_plain_string() {
        let json = serde_json::to_string(&Action::Delete).unwrap();
        assert_eq!(json, "\"delete\"");
        let parsed: Action = serde_json::from_str("\"export\"").unwrap();
        assert_eq!(parsed, Action::Custom("export".into()));
    }

    #[test]
    fn test_grant_covers_exact() {
        let grant = Grant::new("read", "report");
        assert!(grant.covers("read", "report"));
        assert!(!grant.covers("update", "report"));
        assert!(!grant.covers("read", "view-post"));
    }

    #[test]
    fn test_grant_covers_wildcards() {
        assert!(Grant::new("manage", "report").covers("delete", "report"));
        assert!(Grant::new("read", "all").covers("read", "anything"));
        assert!(!Grant::new("read", "all").covers("update", "anything"));
        assert!(Grant::new("manage", "all").covers("approve", "x"));
    }

    #[test]
    fn test_grant_display() {
        assert_eq!(
            Grant::new("read", "member-page").to_string(),
            "(read, member-page)"
        );
    }
}
