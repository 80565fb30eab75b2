//! Authorization primitives for arbiter.
//!
//! Resolves, for the identity behind the current request, the effective
//! permission level on a named resource, and carries that identity
//! through a call chain without threading it through every signature.
//!
//! # Model
//!
//! ```text
//! GrantSet { specific: {"orders": rw, "secrets": none}, default: ro }
//!     │
//! AuthorizationContext::resolve_level(name)
//!     1. specific[name]   ──► found: return it (even if lower than default)
//!     2. default          ──► set:   return it
//!     3. PermissionLevel::None
//! ```
//!
//! | Type | Role |
//! |------|------|
//! | [`PermissionLevel`] | Ordered tier `None < ReadOnly < ReadWrite` |
//! | [`GrantSet`] | Per-resource grants plus an optional default |
//! | [`AuthorizationContext`] | Immutable grants of one identity; resolution |
//! | [`ExecutionContext`] | Identity + authorization of the running task |
//! | [`ExecScope`] | Guard pairing every activation with a deactivation |
//! | [`AccessGate`] | Caller-side allow/deny decision |
//! | [`GrantSource`] | Caller-side population of grants |
//!
//! # Crate Architecture
//!
//! ```text
//! arbiter-types    (Principal, UserName, DatabaseName, ExecutionId)
//!      ↑
//! arbiter-auth     ◄── THIS CRATE
//!      ↑
//! arbiter-runtime  (config, StaticGrantSource, DefaultGate, spawn_with_context)
//! ```
//!
//! # Example
//!
//! ```
//! use arbiter_auth::{AuthorizationContext, ExecutionContext, GrantSet, PermissionLevel};
//! use arbiter_types::{DatabaseName, Principal};
//! use std::sync::Arc;
//!
//! let authz = AuthorizationContext::new(
//!     GrantSet::new()
//!         .with_specific("orders", PermissionLevel::ReadWrite)
//!         .with_default(PermissionLevel::ReadOnly),
//! );
//! let ctx = Arc::new(ExecutionContext::new(
//!     Principal::user("alice"),
//!     DatabaseName::new("sales"),
//!     authz,
//! ));
//!
//! let _scope = ExecutionContext::activate(ctx);
//!
//! // Deep inside the call chain:
//! let level = ExecutionContext::current()
//!     .map(|c| c.resolve_level("invoices"))
//!     .unwrap_or_default();
//! assert_eq!(level, PermissionLevel::ReadOnly);
//! ```

pub mod authz;
pub mod error;
pub mod exec;
pub mod grant;
pub mod level;
pub mod policy;

pub use authz::AuthorizationContext;
pub use error::AccessDenied;
pub use exec::{ExecScope, ExecutionContext};
pub use grant::{GrantSet, WILDCARD};
pub use level::{ParseLevelError, PermissionLevel};
pub use policy::{AccessGate, EmptySlotPolicy, GrantSource};

// Re-export identity types for convenience
pub use arbiter_types::{DatabaseName, Principal, UserName};
