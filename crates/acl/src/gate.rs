//! Declarative gates for routes and UI elements.

use crate::{Ability, Action, Error, Result, Subject};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The `(action, subject)` pair a page or element requires.
///
/// The default gate is `(manage, all)`: anything that does not declare its
/// own requirement is only reachable with full access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    pub action: Action,
    pub subject: Subject,
}

impl Gate {
    pub fn new(action: impl Into<Action>, subject: impl Into<Subject>) -> Self {
        Self {
            action: action.into(),
            subject: subject.into(),
        }
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new(Action::Manage, Subject::all())
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.subject)
    }
}

/// Result of evaluating a gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny { reason: String },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

impl Ability {
    /// Evaluate a gate.
    pub fn check(&self, gate: &Gate) -> Decision {
        if self.can(gate.action.as_str(), &gate.subject) {
            Decision::Allow
        } else {
            Decision::Deny {
                reason: format!("no grant covers {gate}"),
            }
        }
    }

    /// Evaluate a gate, returning [`Error::Denied`] if it does not pass.
    pub fn require(&self, gate: &Gate) -> Result<()> {
        match self.check(gate) {
            Decision::Allow => Ok(()),
            Decision::Deny { reason } => {
                tracing::debug!(%gate, %reason, "gate denied");
                Err(Error::Denied {
                    action: gate.action.to_string(),
                    subject: gate.subject.to_string(),
                })
            }
        }
    }
}
