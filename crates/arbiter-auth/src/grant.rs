//! Resource grant sets.
//!
//! A [`GrantSet`] holds the grants one identity has been given:
//! resource-specific levels plus an optional default that applies to
//! every resource without a specific entry.
//!
//! # Wildcard Handling
//!
//! Policy stores traditionally encode the default as a map entry under
//! the key `"*"`. [`GrantSet::from_flat_map`] accepts that encoding and
//! moves the `"*"` entry into the dedicated default slot, so a resource
//! named `"*"` added later through [`GrantSet::with_specific`] is never
//! mistaken for the default.

use crate::PermissionLevel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key used for the default grant in flat grant maps.
pub const WILDCARD: &str = "*";

/// Resource-specific grants plus an optional default.
///
/// Keys are case-sensitive and are not validated: the collaborator that
/// populates the set owns key hygiene.
///
/// # Example
///
/// ```
/// use arbiter_auth::{GrantSet, PermissionLevel};
///
/// let grants = GrantSet::new()
///     .with_specific("orders", PermissionLevel::ReadWrite)
///     .with_default(PermissionLevel::ReadOnly);
///
/// assert_eq!(grants.specific("orders"), Some(PermissionLevel::ReadWrite));
/// assert_eq!(grants.specific("invoices"), None);
/// assert_eq!(grants.default_level(), Some(PermissionLevel::ReadOnly));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantSet {
    #[serde(default)]
    specific: HashMap<String, PermissionLevel>,
    #[serde(default)]
    default: Option<PermissionLevel>,
}

impl GrantSet {
    /// Creates an empty grant set. Every resource resolves to
    /// [`PermissionLevel::None`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a grant set from a flat map that uses `"*"` as the
    /// default key.
    ///
    /// # Example
    ///
    /// ```
    /// use arbiter_auth::{GrantSet, PermissionLevel};
    /// use std::collections::HashMap;
    ///
    /// let flat = HashMap::from([
    ///     ("orders".to_string(), PermissionLevel::ReadWrite),
    ///     ("*".to_string(), PermissionLevel::ReadOnly),
    /// ]);
    /// let grants = GrantSet::from_flat_map(flat);
    ///
    /// assert_eq!(grants.default_level(), Some(PermissionLevel::ReadOnly));
    /// assert_eq!(grants.specific("*"), None);
    /// assert_eq!(grants.len(), 1);
    /// ```
    #[must_use]
    pub fn from_flat_map<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, PermissionLevel)>,
    {
        let mut specific = HashMap::new();
        let mut default = None;
        for (resource, level) in entries {
            if resource == WILDCARD {
                default = Some(level);
            } else {
                specific.insert(resource, level);
            }
        }
        Self { specific, default }
    }

    /// Adds (or replaces) a grant for one resource.
    ///
    /// The name is taken literally, including `"*"`.
    #[must_use]
    pub fn with_specific(mut self, resource: impl Into<String>, level: PermissionLevel) -> Self {
        self.specific.insert(resource.into(), level);
        self
    }

    /// Sets the default grant.
    #[must_use]
    pub fn with_default(mut self, level: PermissionLevel) -> Self {
        self.default = Some(level);
        self
    }

    /// Returns the resource-specific level, if one exists.
    #[must_use]
    pub fn specific(&self, resource: &str) -> Option<PermissionLevel> {
        self.specific.get(resource).copied()
    }

    /// Returns the default level, if one exists.
    #[must_use]
    pub fn default_level(&self) -> Option<PermissionLevel> {
        self.default
    }

    /// Number of resource-specific grants (the default is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.specific.len()
    }

    /// Returns `true` if there are neither specific grants nor a default.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specific.is_empty() && self.default.is_none()
    }

    /// Iterates over the resource-specific grants in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, PermissionLevel)> {
        self.specific.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set() {
        let grants = GrantSet::new();
        assert!(grants.is_empty());
        assert_eq!(grants.len(), 0);
        assert_eq!(grants.default_level(), None);
    }

    #[test]
    fn default_only_is_not_empty() {
        let grants = GrantSet::new().with_default(PermissionLevel::None);
        assert!(!grants.is_empty());
        assert_eq!(grants.len(), 0);
    }

    #[test]
    fn with_specific_replaces_existing_entry() {
        let grants = GrantSet::new()
            .with_specific("orders", PermissionLevel::ReadOnly)
            .with_specific("orders", PermissionLevel::ReadWrite);
        assert_eq!(grants.len(), 1);
        assert_eq!(grants.specific("orders"), Some(PermissionLevel::ReadWrite));
    }

    #[test]
    fn literal_star_resource_is_not_the_default() {
        let grants = GrantSet::new().with_specific(WILDCARD, PermissionLevel::ReadWrite);
        assert_eq!(grants.specific("*"), Some(PermissionLevel::ReadWrite));
        assert_eq!(grants.default_level(), None);
    }

    #[test]
    fn flat_map_extracts_wildcard() {
        let grants = GrantSet::from_flat_map([
            ("secrets".to_string(), PermissionLevel::None),
            ("*".to_string(), PermissionLevel::ReadWrite),
        ]);
        assert_eq!(grants.specific("secrets"), Some(PermissionLevel::None));
        assert_eq!(grants.default_level(), Some(PermissionLevel::ReadWrite));
        assert_eq!(grants.len(), 1);
    }

    #[test]
    fn keys_are_case_sensitive() {
        let grants = GrantSet::new().with_specific("Orders", PermissionLevel::ReadWrite);
        assert_eq!(grants.specific("orders"), None);
    }

    #[test]
    fn iter_visits_specific_grants() {
        let grants = GrantSet::new()
            .with_specific("a", PermissionLevel::ReadOnly)
            .with_specific("b", PermissionLevel::ReadWrite)
            .with_default(PermissionLevel::ReadOnly);
        let mut seen: Vec<_> = grants.iter().collect();
        seen.sort();
        assert_eq!(
            seen,
            vec![("a", PermissionLevel::ReadOnly), ("b", PermissionLevel::ReadWrite)]
        );
    }

    #[test]
    fn serde_shape() {
        let grants: GrantSet =
            serde_json::from_str(r#"{"specific":{"orders":"rw"},"default":"ro"}"#)
                .expect("deserialize");
        assert_eq!(grants.specific("orders"), Some(PermissionLevel::ReadWrite));
        assert_eq!(grants.default_level(), Some(PermissionLevel::ReadOnly));

        let empty: GrantSet = serde_json::from_str("{}").expect("deserialize empty");
        assert!(empty.is_empty());
    }
}
