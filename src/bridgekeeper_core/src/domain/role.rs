use std::fmt;

use serde::Serialize;

pub const DEFAULT_ROLE_PREFIX: &str = "ROLE_EXT_";

/// Namespaced role tag derived from an external role name,
/// e.g. `editor` becomes `ROLE_EXT_EDITOR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MappedRole(String);

impl MappedRole {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MappedRole {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MappedRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Translates external role names into [`MappedRole`] tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleMapper {
    prefix: String,
}

impl Default for RoleMapper {
    fn default() -> Self {
        Self::new(DEFAULT_ROLE_PREFIX)
    }
}

impl RoleMapper {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn map_role(&self, name: &str) -> MappedRole {
        MappedRole(format!("{}{}", self.prefix, name.to_uppercase()))
    }

    /// Maps every role name, keeping the source order. Names that collapse to
    /// the same tag are kept once, at their first position.
    pub fn map_roles<'a, I>(&self, names: I) -> Vec<MappedRole>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut mapped: Vec<MappedRole> = Vec::new();
        for role in names.into_iter().map(|name| self.map_role(name)) {
            if !mapped.contains(&role) {
                mapped.push(role);
            }
        }
        mapped
    }
}
