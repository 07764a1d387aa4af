//! User records as supplied by the auth collaborator.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// One role object of a staff account, carrying numeric permission identifiers.
///
/// Identifiers are kept as raw JSON numbers. Negative, oversized or
/// fractional values still parse; they simply match nothing in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleEntry {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// `None` when the entry carried no `permissionID` field at all.
    #[serde(rename = "permissionID", default, skip_serializing_if = "Option::is_none")]
    pub permission_ids: Option<Vec<Number>>,
}

impl RoleEntry {
    pub fn with_permissions(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            permission_ids: Some(ids.into_iter().map(Number::from).collect()),
            ..Default::default()
        }
    }

    /// Permission identifiers held by this entry; empty when the field is missing.
    pub fn permission_ids(&self) -> &[Number] {
        self.permission_ids.as_deref().unwrap_or_default()
    }
}

/// The polymorphic `role` attribute.
///
/// Deserialization of this field never fails: shapes that are neither a
/// string tag nor a list of role entries land in `Unrecognized`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Role {
    /// A single role tag such as `"member"`.
    Tag(String),
    /// An ordered list of role objects.
    Entries(Vec<RoleEntry>),
    /// `null` or missing.
    #[default]
    Absent,
    Unrecognized(Value),
}

/// A user record with identifying fields and a role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,

    #[serde(default)]
    pub role: Role,

    /// Every other field of the record, kept for consumers.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl UserRecord {
    /// Parse a user record from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Parse a user record from an already decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::Parse(e.to_string()))
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// A record carrying only the given role tag.
    pub fn tagged(tag: impl Into<String>) -> Self {
        Self::default().with_role(Role::Tag(tag.into()))
    }

    /// A record carrying only the given role entries.
    pub fn with_entries(entries: Vec<RoleEntry>) -> Self {
        Self::default().with_role(Role::Entries(entries))
    }
}
