//! Rule derivation: user record to ordered grant list.

use crate::{Grant, PermissionCatalog, Role, RoleEntry, Subject, UserRecord};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::BTreeMap;

/// Policy constants consulted during derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Role tag that receives `member_grants`.
    #[serde(default = "default_member_role")]
    pub member_role: String,

    /// Fixed grants for the member role tag. The catalog is not consulted.
    #[serde(default = "default_member_grants")]
    pub member_grants: Vec<Grant>,

    /// Fixed grants for any non-empty list of role entries, emitted first.
    #[serde(default = "default_staff_grants")]
    pub staff_grants: Vec<Grant>,

    /// Extra grants implied by holding a permission on a given subject.
    #[serde(default = "default_implications")]
    pub implications: BTreeMap<Subject, Vec<Grant>>,
}

fn default_member_role() -> String {
    "member".to_string()
}

fn default_member_grants() -> Vec<Grant> {
    vec![
        Grant::new("read", "member-page"),
        Grant::new("read", "view-post"),
    ]
}

fn default_staff_grants() -> Vec<Grant> {
    vec![Grant::new("read", "analytics")]
}

fn default_implications() -> BTreeMap<Subject, Vec<Grant>> {
    BTreeMap::from([(Subject::from("report"), vec![Grant::new("read", "view-post")])])
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            member_role: default_member_role(),
            member_grants: default_member_grants(),
            staff_grants: default_staff_grants(),
            implications: default_implications(),
        }
    }
}

/// Maps user records to grant lists under a fixed set of [`Rules`].
#[derive(Debug, Clone, Default)]
pub struct RuleDeriver {
    rules: Rules,
}

impl RuleDeriver {
    pub fn new(rules: Rules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Derive the grants for `user`, in emission order.
    ///
    /// Total over every input: unknown roles and unknown permission
    /// identifiers contribute nothing. Duplicates are kept.
    pub fn derive(&self, user: &UserRecord, catalog: &PermissionCatalog) -> Vec<Grant> {
        let mut grants = Vec::new();

        let permission_ids: Vec<&Number> = match &user.role {
            Role::Entries(entries) if !entries.is_empty() => {
                grants.extend(self.rules.staff_grants.iter().cloned());
                entries.iter().flat_map(entry_permission_ids).collect()
            }
            Role::Tag(tag) if *tag == self.rules.member_role => {
                grants.extend(self.rules.member_grants.iter().cloned());
                Vec::new()
            }
            Role::Entries(_) | Role::Absent => Vec::new(),
            Role::Tag(tag) => {
                tracing::debug!(role = %tag, "no grants for role tag");
                Vec::new()
            }
            Role::Unrecognized(value) => {
                tracing::debug!(role = %value, "unrecognized role shape, deriving no grants");
                Vec::new()
            }
        };

        for id in permission_ids {
            let Some(permission) = catalog.get_by_number(id) else {
                tracing::debug!(permission_id = %id, "permission not in catalog, skipping");
                continue;
            };
            grants.push(permission.grant());
            if let Some(implied) = self.rules.implications.get(&permission.subject) {
                grants.extend(implied.iter().cloned());
            }
        }

        grants
    }
}

fn entry_permission_ids(entry: &RoleEntry) -> impl Iterator<Item = &Number> + '_ {
    if entry.permission_ids.is_none() {
        tracing::debug!(role = ?entry.name, "role entry has no permission list");
    }
    entry.permission_ids().iter()
}

/// Derive grants with the default [`Rules`].
pub fn derive_grants(user: &UserRecord, catalog: &PermissionCatalog) -> Vec<Grant> {
    RuleDeriver::default().derive(user, catalog)
}
