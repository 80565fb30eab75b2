//! Static implementation of [`GrantSource`].
//!
//! Provides [`StaticGrantSource`], which builds every user's
//! [`AuthorizationContext`]s once from an [`ArbiterConfig`] and hands out
//! shared references to them.
//!
//! # Architecture
//!
//! ```text
//! GrantSource trait (arbiter-auth)          ← abstract definition
//!          │
//!          └── StaticGrantSource (THIS MODULE)  ← config-backed impl
//! ```

use crate::config::ArbiterConfig;
use arbiter_auth::{AuthorizationContext, ExecutionContext, GrantSource, WILDCARD};
use arbiter_types::{DatabaseName, ErrorCode, Principal, UserName};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Error returned by [`StaticGrantSource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The user has no entry in the configuration.
    #[error("unknown user '{0}'")]
    UnknownUser(UserName),
}

impl ErrorCode for SourceError {
    fn code(&self) -> &'static str {
        match self {
            Self::UnknownUser(_) => "SOURCE_UNKNOWN_USER",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Config-backed, immutable grant source.
///
/// Contexts are built at construction and shared via `Arc`, so every
/// execution for the same user and database reads the same immutable
/// [`AuthorizationContext`]. Reloading means building a new source.
///
/// Database lookup uses the same two-level fallback as collections: the
/// exact database, then the `"*"` database entry, then a context that
/// grants nothing.
///
/// # Example
///
/// ```
/// use arbiter_auth::{GrantSource, PermissionLevel};
/// use arbiter_runtime::{config::ArbiterConfig, StaticGrantSource};
/// use arbiter_types::{DatabaseName, UserName};
///
/// let config = ArbiterConfig::from_toml(r#"
/// [users.alice.databases.sales.collections]
/// orders = "rw"
/// "*" = "ro"
/// "#).unwrap();
/// let source = StaticGrantSource::from_config(&config);
///
/// let ctx = source
///     .context_for(&UserName::new("alice"), &DatabaseName::new("sales"))
///     .unwrap();
/// assert_eq!(ctx.resolve_level("orders"), PermissionLevel::ReadWrite);
/// assert_eq!(ctx.resolve_level("invoices"), PermissionLevel::ReadOnly);
/// ```
#[derive(Debug, Default)]
pub struct StaticGrantSource {
    users: HashMap<UserName, HashMap<String, Arc<AuthorizationContext>>>,
    denied: Arc<AuthorizationContext>,
}

impl StaticGrantSource {
    /// Builds a source from configuration.
    #[must_use]
    pub fn from_config(config: &ArbiterConfig) -> Self {
        let users = config
            .users
            .iter()
            .map(|(name, user)| {
                let databases = user
                    .databases
                    .iter()
                    .map(|(db, grants)| (db.clone(), Arc::new(grants.to_authorization())))
                    .collect();
                (UserName::new(name.as_str()), databases)
            })
            .collect::<HashMap<_, _>>();

        tracing::debug!(users = users.len(), "built static grant source");
        Self {
            users,
            denied: Arc::new(AuthorizationContext::denied()),
        }
    }

    /// Number of configured users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Returns `true` if `user` is configured.
    #[must_use]
    pub fn knows(&self, user: &UserName) -> bool {
        self.users.contains_key(user)
    }

    fn shared_authorization(
        &self,
        user: &UserName,
        database: &DatabaseName,
    ) -> Result<Arc<AuthorizationContext>, SourceError> {
        let databases = self
            .users
            .get(user)
            .ok_or_else(|| SourceError::UnknownUser(user.clone()))?;

        let authz = databases
            .get(database.as_str())
            .or_else(|| databases.get(WILDCARD))
            .unwrap_or(&self.denied);
        Ok(Arc::clone(authz))
    }
}

impl GrantSource for StaticGrantSource {
    type Error = SourceError;

    fn authorization_for(
        &self,
        user: &UserName,
        database: &DatabaseName,
    ) -> Result<AuthorizationContext, Self::Error> {
        self.shared_authorization(user, database)
            .map(|authz| (*authz).clone())
    }

    fn context_for(
        &self,
        user: &UserName,
        database: &DatabaseName,
    ) -> Result<Arc<ExecutionContext>, Self::Error> {
        let authz = self.shared_authorization(user, database)?;
        Ok(Arc::new(ExecutionContext::new(
            Principal::User(user.clone()),
            database.clone(),
            authz,
        )))
    }
}
