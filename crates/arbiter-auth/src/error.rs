//! Access denied error type.
//!
//! Resolution itself never fails. [`AccessDenied`] is produced by an
//! [`AccessGate`](crate::AccessGate) when it compares a resolved level
//! against the level an operation requires.

use crate::PermissionLevel;
use arbiter_types::{DatabaseName, ErrorCode};
use thiserror::Error;

/// Why a gate refused an operation.
///
/// # Example
///
/// ```
/// use arbiter_auth::{AccessDenied, PermissionLevel};
/// use arbiter_types::ErrorCode;
///
/// let err = AccessDenied::Insufficient {
///     resource: "orders".to_string(),
///     required: PermissionLevel::ReadWrite,
///     granted: PermissionLevel::ReadOnly,
/// };
///
/// assert_eq!(err.code(), "AUTHZ_INSUFFICIENT_LEVEL");
/// assert!(err.to_string().contains("orders"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// The active identity's level for a resource is below the requirement.
    #[error("access to '{resource}' requires {required}, granted {granted}")]
    Insufficient {
        /// The resource that was queried.
        resource: String,
        /// The level the operation needs.
        required: PermissionLevel,
        /// The level the identity resolved to.
        granted: PermissionLevel,
    },

    /// The active identity's level for a database is below the requirement.
    #[error("access to database '{database}' requires {required}, granted {granted}")]
    DatabaseInsufficient {
        /// The database that was queried.
        database: DatabaseName,
        /// The level the operation needs.
        required: PermissionLevel,
        /// The level the identity resolved to.
        granted: PermissionLevel,
    },

    /// No execution context is active and the gate denies in that case.
    #[error("no active execution context for '{resource}'")]
    NoActiveContext {
        /// The resource that was queried.
        resource: String,
    },
}

impl ErrorCode for AccessDenied {
    fn code(&self) -> &'static str {
        match self {
            Self::Insufficient { .. } => "AUTHZ_INSUFFICIENT_LEVEL",
            Self::DatabaseInsufficient { .. } => "AUTHZ_DATABASE_INSUFFICIENT_LEVEL",
            Self::NoActiveContext { .. } => "AUTHZ_NO_CONTEXT",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}
