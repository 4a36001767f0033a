//! Per-render page context shared by all nodes of a layout tree.

use std::collections::{BTreeMap, BTreeSet};

/// Data the host supplies for one page render.
///
/// The interpreter never reads it; it is handed unchanged to every node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    /// Groups the current user belongs to.
    pub groups: BTreeSet<String>,

    /// Permissions granted to the current user.
    pub permissions: BTreeSet<String>,

    /// Named values, e.g. the rendered page content.
    pub values: BTreeMap<String, String>,
}

impl PageContext {
    /// Create an empty page context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user group.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.insert(group.into());
        self
    }

    /// Add a user permission.
    #[must_use]
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    /// Set a named value.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Get a named value.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Check whether the user is in any of the given groups or holds any of
    /// the given permissions.
    pub fn matches_any<'a>(
        &self,
        groups: impl IntoIterator<Item = &'a str>,
        permissions: impl IntoIterator<Item = &'a str>,
    ) -> bool {
        groups.into_iter().any(|g| self.groups.contains(g))
            || permissions.into_iter().any(|p| self.permissions.contains(p))
    }
}
