//! Per-identity authorization state.

use crate::{GrantSet, PermissionLevel};
use serde::{Deserialize, Serialize};

/// One identity's resolved grants.
///
/// An `AuthorizationContext` is built once, from a fully populated
/// [`GrantSet`], and never mutated afterwards. Replacing an identity's
/// permissions means building a new context and activating it in place
/// of the old one; readers holding the old one keep a consistent view.
///
/// Two tiers are carried:
///
/// - a **database level**, the access the identity has to the database
///   it was resolved for;
/// - a **grant set** of per-resource (collection) levels with an optional
///   default.
///
/// # Example
///
/// ```
/// use arbiter_auth::{AuthorizationContext, GrantSet, PermissionLevel};
///
/// let ctx = AuthorizationContext::new(
///     GrantSet::new()
///         .with_specific("orders", PermissionLevel::ReadWrite)
///         .with_default(PermissionLevel::ReadOnly),
/// );
///
/// assert_eq!(ctx.resolve_level("orders"), PermissionLevel::ReadWrite);
/// assert_eq!(ctx.resolve_level("invoices"), PermissionLevel::ReadOnly);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationContext {
    grants: GrantSet,
    #[serde(default)]
    database: PermissionLevel,
}

impl AuthorizationContext {
    /// Creates a context from a grant set. The database level is
    /// [`PermissionLevel::None`] until set.
    #[must_use]
    pub fn new(grants: GrantSet) -> Self {
        Self {
            grants,
            database: PermissionLevel::None,
        }
    }

    /// Sets the database level.
    #[must_use]
    pub fn with_database_level(mut self, level: PermissionLevel) -> Self {
        self.database = level;
        self
    }

    /// A context granting read-write on the database and every resource.
    #[must_use]
    pub fn unrestricted() -> Self {
        Self::new(GrantSet::new().with_default(PermissionLevel::ReadWrite))
            .with_database_level(PermissionLevel::ReadWrite)
    }

    /// A context granting nothing.
    #[must_use]
    pub fn denied() -> Self {
        Self::default()
    }

    /// Resolves the effective level for `resource`.
    ///
    /// Lookup order:
    ///
    /// 1. the grant for exactly `resource`;
    /// 2. the default grant;
    /// 3. [`PermissionLevel::None`].
    ///
    /// A specific grant always wins over the default, even when it is
    /// lower: a specific `None` masks a read-write default.
    ///
    /// # Example
    ///
    /// ```
    /// use arbiter_auth::{AuthorizationContext, GrantSet, PermissionLevel};
    ///
    /// let ctx = AuthorizationContext::new(
    ///     GrantSet::new()
    ///         .with_specific("secrets", PermissionLevel::None)
    ///         .with_default(PermissionLevel::ReadWrite),
    /// );
    /// assert_eq!(ctx.resolve_level("secrets"), PermissionLevel::None);
    /// assert_eq!(ctx.resolve_level("anything"), PermissionLevel::ReadWrite);
    /// ```
    #[must_use]
    pub fn resolve_level(&self, resource: &str) -> PermissionLevel {
        let level = self
            .grants
            .specific(resource)
            .or(self.grants.default_level())
            .unwrap_or(PermissionLevel::None);
        tracing::trace!(resource, %level, "resolve_level");
        level
    }

    /// Returns `true` if the level for `resource` satisfies `required`.
    #[must_use]
    pub fn can_use(&self, resource: &str, required: PermissionLevel) -> bool {
        self.resolve_level(resource).allows(required)
    }

    /// Returns the database level.
    #[must_use]
    pub fn database_level(&self) -> PermissionLevel {
        self.database
    }

    /// Returns the underlying grant set.
    #[must_use]
    pub fn grants(&self) -> &GrantSet {
        &self.grants
    }

    /// Returns `true` if this context grants read-write everywhere.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.database == PermissionLevel::ReadWrite
            && self.grants.default_level() == Some(PermissionLevel::ReadWrite)
            && self.grants.iter().all(|(_, l)| l == PermissionLevel::ReadWrite)
    }
}
