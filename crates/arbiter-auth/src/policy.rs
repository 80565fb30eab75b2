//! Gate and grant-source traits.
//!
//! The authorization core resolves levels; deciding what to do with them
//! belongs to callers. This module defines the two seams callers plug
//! into:
//!
//! ```text
//! GrantSource  (populates)  ──►  AuthorizationContext / ExecutionContext
//!                                        │ activate
//!                                        ▼
//!                              ExecutionContext::current()
//!                                        │
//! AccessGate   (decides)    ◄────────────┘  Ok(level) / Err(AccessDenied)
//! ```
//!
//! Concrete implementations live in `arbiter-runtime`.

use crate::{AccessDenied, AuthorizationContext, ExecutionContext, PermissionLevel};
use arbiter_types::{DatabaseName, ErrorCode, Principal, UserName};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What a gate does when no execution context is active.
///
/// # Example
///
/// ```
/// use arbiter_auth::EmptySlotPolicy;
///
/// assert_eq!(EmptySlotPolicy::default(), EmptySlotPolicy::Deny);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySlotPolicy {
    /// Treat the caller as unrestricted (e.g. internal server code paths
    /// that never activate a context).
    Unrestricted,

    /// Deny every operation.
    #[default]
    Deny,
}

/// Allows or denies operations based on the active execution context.
///
/// Implementors choose the [`EmptySlotPolicy`]; the resolution and
/// comparison logic is shared.
///
/// # Example
///
/// ```
/// use arbiter_auth::{
///     AccessGate, AuthorizationContext, EmptySlotPolicy, ExecutionContext, GrantSet,
///     PermissionLevel,
/// };
/// use arbiter_types::{DatabaseName, Principal};
/// use std::sync::Arc;
///
/// struct StrictGate;
///
/// impl AccessGate for StrictGate {
///     fn empty_slot(&self) -> EmptySlotPolicy {
///         EmptySlotPolicy::Deny
///     }
/// }
///
/// let gate = StrictGate;
/// assert!(gate.check_resource("orders", PermissionLevel::ReadOnly).is_err());
///
/// let ctx = Arc::new(ExecutionContext::new(
///     Principal::user("alice"),
///     DatabaseName::new("sales"),
///     AuthorizationContext::new(GrantSet::new().with_default(PermissionLevel::ReadOnly)),
/// ));
/// let _scope = ExecutionContext::activate(ctx);
/// assert!(gate.check_resource("orders", PermissionLevel::ReadOnly).is_ok());
/// assert!(gate.check_resource("orders", PermissionLevel::ReadWrite).is_err());
/// ```
pub trait AccessGate: Send + Sync {
    /// Behaviour when no context is active.
    fn empty_slot(&self) -> EmptySlotPolicy;

    /// Returns the level `ctx` (or the empty slot) has for `resource`.
    ///
    /// The superuser always resolves to [`PermissionLevel::ReadWrite`].
    fn level_for(
        &self,
        ctx: Option<&ExecutionContext>,
        resource: &str,
    ) -> Result<PermissionLevel, AccessDenied> {
        match ctx {
            Some(ctx) if ctx.is_superuser() => Ok(PermissionLevel::ReadWrite),
            Some(ctx) => Ok(ctx.resolve_level(resource)),
            None => match self.empty_slot() {
                EmptySlotPolicy::Unrestricted => Ok(PermissionLevel::ReadWrite),
                EmptySlotPolicy::Deny => Err(AccessDenied::NoActiveContext {
                    resource: resource.to_string(),
                }),
            },
        }
    }

    /// Checks that the active context has at least `required` on
    /// `resource`, returning the granted level.
    fn check_resource(
        &self,
        resource: &str,
        required: PermissionLevel,
    ) -> Result<PermissionLevel, AccessDenied> {
        let ctx = ExecutionContext::current();
        let granted = self.level_for(ctx.as_deref(), resource)?;
        if granted.allows(required) {
            Ok(granted)
        } else {
            Err(AccessDenied::Insufficient {
                resource: resource.to_string(),
                required,
                granted,
            })
        }
    }

    /// Checks that the active context has at least `required` on
    /// `database`, returning the granted level.
    fn check_database(
        &self,
        database: &DatabaseName,
        required: PermissionLevel,
    ) -> Result<PermissionLevel, AccessDenied> {
        let granted = match ExecutionContext::current() {
            Some(ctx) if ctx.is_superuser() => PermissionLevel::ReadWrite,
            Some(ctx) if ctx.database() == database => ctx.authz().database_level(),
            Some(_) => PermissionLevel::None,
            None => match self.empty_slot() {
                EmptySlotPolicy::Unrestricted => PermissionLevel::ReadWrite,
                EmptySlotPolicy::Deny => {
                    return Err(AccessDenied::NoActiveContext {
                        resource: database.to_string(),
                    })
                }
            },
        };
        if granted.allows(required) {
            Ok(granted)
        } else {
            Err(AccessDenied::DatabaseInsufficient {
                database: database.clone(),
                required,
                granted,
            })
        }
    }
}

/// Produces authorization state for an authenticated user.
///
/// This is the boundary to whatever stores grants (configuration file,
/// replicated user collection, external policy service). The core never
/// populates grants itself.
pub trait GrantSource: Send + Sync {
    /// Error returned when the user cannot be resolved.
    type Error: std::error::Error + ErrorCode + Send + Sync + 'static;

    /// Resolves `user`'s grants within `database`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the source does not know the user.
    fn authorization_for(
        &self,
        user: &UserName,
        database: &DatabaseName,
    ) -> Result<AuthorizationContext, Self::Error>;

    /// Builds an execution context ready for activation.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`authorization_for`](Self::authorization_for).
    fn context_for(
        &self,
        user: &UserName,
        database: &DatabaseName,
    ) -> Result<Arc<ExecutionContext>, Self::Error> {
        let authz = self.authorization_for(user, database)?;
        Ok(Arc::new(ExecutionContext::new(
            Principal::User(user.clone()),
            database.clone(),
            authz,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GrantSet;

    struct Gate(EmptySlotPolicy);

    impl AccessGate for Gate {
        fn empty_slot(&self) -> EmptySlotPolicy {
            self.0
        }
    }

    fn alice() -> Arc<ExecutionContext> {
        Arc::new(ExecutionContext::new(
            Principal::user("alice"),
            DatabaseName::new("sales"),
            AuthorizationContext::new(
                GrantSet::new()
                    .with_specific("orders", PermissionLevel::ReadWrite)
                    .with_specific("secrets", PermissionLevel::None)
                    .with_default(PermissionLevel::ReadOnly),
            )
            .with_database_level(PermissionLevel::ReadOnly),
        ))
    }

    #[test]
    fn empty_slot_deny() {
        let err = Gate(EmptySlotPolicy::Deny)
            .check_resource("orders", PermissionLevel::None)
            .expect_err("deny policy");
        assert!(matches!(err, AccessDenied::NoActiveContext { .. }));
    }

    #[test]
    fn empty_slot_unrestricted() {
        let granted = Gate(EmptySlotPolicy::Unrestricted)
            .check_resource("orders", PermissionLevel::ReadWrite)
            .expect("unrestricted policy");
        assert_eq!(granted, PermissionLevel::ReadWrite);
    }

    #[test]
    fn active_context_levels_are_compared() {
        let gate = Gate(EmptySlotPolicy::Unrestricted);
        let _scope = ExecutionContext::activate(alice());

        assert_eq!(
            gate.check_resource("orders", PermissionLevel::ReadWrite),
            Ok(PermissionLevel::ReadWrite)
        );
        assert_eq!(
            gate.check_resource("invoices", PermissionLevel::ReadOnly),
            Ok(PermissionLevel::ReadOnly)
        );
        assert_eq!(
            gate.check_resource("invoices", PermissionLevel::ReadWrite),
            Err(AccessDenied::Insufficient {
                resource: "invoices".into(),
                required: PermissionLevel::ReadWrite,
                granted: PermissionLevel::ReadOnly,
            })
        );
        assert!(gate
            .check_resource("secrets", PermissionLevel::ReadOnly)
            .is_err());
    }

    #[test]
    fn superuser_passes_everything() {
        let gate = Gate(EmptySlotPolicy::Deny);
        let _scope = ExecutionContext::superuser_scope();
        assert!(gate
            .check_resource("secrets", PermissionLevel::ReadWrite)
            .is_ok());
        assert!(gate
            .check_database(&DatabaseName::new("hr"), PermissionLevel::ReadWrite)
            .is_ok());
    }

    #[test]
    fn database_checks() {
        let gate = Gate(EmptySlotPolicy::Deny);
        let sales = DatabaseName::new("sales");

        assert!(matches!(
            gate.check_database(&sales, PermissionLevel::ReadOnly),
            Err(AccessDenied::NoActiveContext { .. })
        ));

        let _scope = ExecutionContext::activate(alice());
        assert_eq!(
            gate.check_database(&sales, PermissionLevel::ReadOnly),
            Ok(PermissionLevel::ReadOnly)
        );
        assert!(matches!(
            gate.check_database(&sales, PermissionLevel::ReadWrite),
            Err(AccessDenied::DatabaseInsufficient { .. })
        ));
        assert!(matches!(
            gate.check_database(&DatabaseName::new("hr"), PermissionLevel::ReadOnly),
            Err(AccessDenied::DatabaseInsufficient {
                granted: PermissionLevel::None,
                ..
            })
        ));
    }

    #[test]
    fn level_for_explicit_context() {
        let gate = Gate(EmptySlotPolicy::Deny);
        let ctx = alice();
        assert_eq!(
            gate.level_for(Some(ctx.as_ref()), "secrets"),
            Ok(PermissionLevel::None)
        );
        assert!(gate.level_for(None, "secrets").is_err());
    }

    #[test]
    fn empty_slot_policy_serde() {
        let json = serde_json::to_string(&EmptySlotPolicy::Unrestricted).expect("serialize");
        assert_eq!(json, "\"unrestricted\"");
        let parsed: EmptySlotPolicy = serde_json::from_str("\"deny\"").expect("deserialize");
        assert_eq!(parsed, EmptySlotPolicy::Deny);
    }

    #[derive(Debug, thiserror::Error)]
    #[error("unknown user {0}")]
    struct Unknown(String);

    impl ErrorCode for Unknown {
        fn code(&self) -> &'static str {
            "TEST_UNKNOWN"
        }
        fn is_recoverable(&self) -> bool {
            false
        }
    }

    struct OneUser;

    impl GrantSource for OneUser {
        type Error = Unknown;

        fn authorization_for(
            &self,
            user: &UserName,
            _database: &DatabaseName,
        ) -> Result<AuthorizationContext, Self::Error> {
            if user.as_str() == "alice" {
                Ok(AuthorizationContext::unrestricted())
            } else {
                Err(Unknown(user.to_string()))
            }
        }
    }

    #[test]
    fn grant_source_default_context_for() {
        let ctx = OneUser
            .context_for(&UserName::new("alice"), &DatabaseName::new("sales"))
            .expect("known user");
        assert_eq!(ctx.user().map(|u| u.as_str()), Some("alice"));
        assert_eq!(ctx.database().as_str(), "sales");
        assert!(!ctx.is_superuser());

        assert!(OneUser
            .context_for(&UserName::new("mallory"), &DatabaseName::new("sales"))
            .is_err());
    }
}
