//! Names and identifiers.
//!
//! [`UserName`] and [`DatabaseName`] are opaque, case-sensitive strings.
//! They are carried alongside an authorization context but never
//! interpreted by it. [`ExecutionId`] is UUID-based and tags one logical
//! task for log correlation.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Name of an authenticated user.
///
/// No validation is applied: whatever the authentication layer resolved
/// is carried verbatim.
///
/// # Example
///
/// ```
/// use arbiter_types::UserName;
///
/// let name = UserName::new("alice");
/// assert_eq!(name.as_str(), "alice");
/// assert_eq!(name, UserName::from("alice"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Creates a user name from any string.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for UserName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of the database an execution is scoped to.
///
/// # Example
///
/// ```
/// use arbiter_types::DatabaseName;
///
/// assert!(DatabaseName::system().is_system());
/// assert!(!DatabaseName::new("sales").is_system());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatabaseName(String);

impl DatabaseName {
    /// Name of the system database.
    pub const SYSTEM: &'static str = "_system";

    /// Creates a database name from any string.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the system database name.
    #[must_use]
    pub fn system() -> Self {
        Self::new(Self::SYSTEM)
    }

    /// Returns `true` if this names the system database.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.0 == Self::SYSTEM
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DatabaseName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for DatabaseName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for DatabaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one logical execution (request or task).
///
/// Generated once per execution context and attached to log records, so
/// activation and deactivation of the same context can be correlated.
///
/// # Example
///
/// ```
/// use arbiter_types::ExecutionId;
///
/// let a = ExecutionId::new();
/// let b = ExecutionId::new();
/// assert_ne!(a, b);
/// assert!(a.to_string().starts_with("exec:"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionId(pub Uuid);

#[allow(clippy::new_without_default)] // Default intentionally not implemented - ids are always fresh
impl ExecutionId {
    /// Creates a new [`ExecutionId`] with a random UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exec:{}", self.0)
    }
}
