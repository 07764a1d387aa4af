//! Static permission catalog.

use crate::{Action, Error, Grant, Result, Subject};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::HashSet;
use std::path::Path;

/// A catalog record mapping a numeric permission identifier to a grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: i64,
    pub action: Action,
    pub subject: Subject,
}

impl Permission {
    pub fn new(id: i64, action: impl Into<Action>, subject: impl Into<Subject>) -> Self {
        Self {
            id,
            action: action.into(),
            subject: subject.into(),
        }
    }

    /// The grant this permission expands into.
    pub fn grant(&self) -> Grant {
        Grant {
            action: self.action.clone(),
            subject: self.subject.clone(),
        }
    }
}

/// Ordered, read-only list of permissions, loaded once before first use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermissionCatalog {
    entries: Vec<Permission>,
}

#[derive(Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    permissions: Vec<Permission>,
}

impl PermissionCatalog {
    /// Build a catalog. Lookups take the first entry with a given id, so a
    /// duplicate identifier is shadowed and only logged.
    pub fn new(entries: Vec<Permission>) -> Self {
        let mut seen = HashSet::with_capacity(entries.len());
        for permission in &entries {
            if !seen.insert(permission.id) {
                tracing::warn!(
                    permission_id = permission.id,
                    "duplicate permission id in catalog, first entry wins"
                );
            }
        }
        Self { entries }
    }

    /// A catalog with no permissions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a catalog from a JSON array of `{id, action, subject}` records.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<Permission> =
            serde_json::from_str(json).map_err(|e| Error::Parse(e.to_string()))?;
        Ok(Self::new(entries))
    }

    /// Parse a catalog from TOML with a `[[permissions]]` array.
    pub fn parse_toml(toml: &str) -> Result<Self> {
        let parsed: TomlCatalog = toml::from_str(toml).map_err(|e| Error::Parse(e.to_string()))?;
        Ok(Self::new(parsed.permissions))
    }

    /// Load a catalog file; the format follows the extension (`.json` or `.toml`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let catalog = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content)?,
            Some("toml") => Self::parse_toml(&content)?,
            _ => {
                return Err(Error::Invalid(format!(
                    "unsupported catalog format: {}",
                    path.display()
                )));
            }
        };
        tracing::debug!(path = %path.display(), permissions = catalog.len(), "loaded permission catalog");
        Ok(catalog)
    }

    /// Look up a permission by identifier.
    pub fn get(&self, id: i64) -> Option<&Permission> {
        self.entries.iter().find(|p| p.id == id)
    }

    /// Look up a permission by a JSON number, compared by value: `7.0`
    /// finds id 7. Fractional and out-of-range numbers find nothing.
    pub fn get_by_number(&self, number: &Number) -> Option<&Permission> {
        let id = match number.as_i64() {
            Some(id) => id,
            None => {
                let value = number.as_f64()?;
                if value.fract() != 0.0 || value < i64::MIN as f64 || value >= i64::MAX as f64 {
                    return None;
                }
                value as i64
            }
        };
        self.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_json_and_lookup() {
        let catalog = PermissionCatalog::from_json(
            r#"[
                {"id": 1, "action": "read", "subject": "user"},
                {"id": 7, "action": "read", "subject": "report"}
            ]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(7).unwrap().subject.as_str(), "report");
        assert!(catalog.get(99).is_none());
    }

    #[test]
    fn test_duplicate_ids_first_entry_wins() {
        let catalog = PermissionCatalog::from_json(
            r#"[
                {"id": 3, "action": "read", "subject": "user"},
                {"id": 3, "action": "delete", "subject": "user"}
            ]"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(3).unwrap().grant(), Grant::new("read", "user"));
    }

    #[test]
    fn test_get_by_number_compares_values() {
        let catalog = PermissionCatalog::new(vec![
            Permission::new(7, "read", "report"),
            Permission::new(-2, "read", "legacy"),
        ]);
        let number = |s: &str| serde_json::from_str::<Number>(s).unwrap();

        assert_eq!(catalog.get_by_number(&number("7")).unwrap().id, 7);
        assert_eq!(catalog.get_by_number(&number("7.0")).unwrap().id, 7);
        assert_eq!(catalog.get_by_number(&number("-2")).unwrap().id, -2);
        assert!(catalog.get_by_number(&number("7.5")).is_none());
        assert!(catalog.get_by_number(&number("5000000000")).is_none());
        assert!(catalog.get_by_number(&number("18446744073709551615")).is_none());
        assert!(catalog.get_by_number(&number("1e300")).is_none());
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[[permissions]]
id = 10
action = "update"
subject = "category"

[[permissions]]
id = 11
action = "approve"
subject = "post"
"#;
        let catalog = PermissionCatalog::parse_toml(toml).unwrap();
        assert_eq!(catalog.get(10).unwrap().grant(), Grant::new("update", "category"));
        assert_eq!(catalog.get(11).unwrap().action, Action::Custom("approve".into()));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("permissions.json");
        let mut file = std::fs::File::create(&json_path).unwrap();
        write!(file, r#"[{{"id": 2, "action": "create", "subject": "post"}}]"#).unwrap();
        assert_eq!(PermissionCatalog::load(&json_path).unwrap().len(), 1);

        let yaml_path = dir.path().join("permissions.yaml");
        std::fs::write(&yaml_path, "- id: 2").unwrap();
        assert!(matches!(
            PermissionCatalog::load(&yaml_path),
            Err(Error::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = PermissionCatalog::from_json(r#"[{"id": "seven"}]"#).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
