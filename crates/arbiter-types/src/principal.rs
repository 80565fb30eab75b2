//! Principal (actor identity) types.
//!
//! A [`Principal`] represents who is acting, separate from what they are
//! allowed to do. Permission levels live in `arbiter-auth`.

use crate::UserName;
use serde::{Deserialize, Serialize};

/// The actor on whose behalf an execution runs.
///
/// | Variant | Description | Typical Use |
/// |---------|-------------|-------------|
/// | `User` | Authenticated user | Client requests |
/// | `Internal` | The server itself | Bootstrap, maintenance, replication |
///
/// # Example
///
/// ```
/// use arbiter_types::Principal;
///
/// let alice = Principal::user("alice");
/// assert_eq!(alice.user_name().map(|u| u.as_str()), Some("alice"));
///
/// let internal = Principal::Internal;
/// assert!(internal.is_internal());
/// assert!(internal.user_name().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Principal {
    /// An authenticated user.
    User(UserName),

    /// Internal server operations not attributable to a user.
    Internal,
}

impl Principal {
    /// Shorthand for `Principal::User(UserName::new(name))`.
    #[must_use]
    pub fn user(name: impl Into<String>) -> Self {
        Self::User(UserName::new(name))
    }

    /// Returns `true` if this is a [`Principal::User`].
    #[must_use]
    pub fn is_user(&self) -> bool {
        matches!(self, Self::User(_))
    }

    /// Returns `true` if this is [`Principal::Internal`].
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }

    /// Returns the user name if this is a User, otherwise `None`.
    #[must_use]
    pub fn user_name(&self) -> Option<&UserName> {
        match self {
            Self::User(name) => Some(name),
            Self::Internal => None,
        }
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User(name) => write!(f, "user:{name}"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_user() {
        let principal = Principal::user("alice");

        assert!(principal.is_user());
        assert!(!principal.is_internal());
        assert_eq!(principal.user_name(), Some(&UserName::new("alice")));
    }

    #[test]
    fn principal_internal() {
        let principal = Principal::Internal;

        assert!(!principal.is_user());
        assert!(principal.is_internal());
        assert!(principal.user_name().is_none());
    }

    #[test]
    fn principal_display() {
        assert_eq!(Principal::user("bob").to_string(), "user:bob");
        assert_eq!(Principal::Internal.to_string(), "internal");
    }

    #[test]
    fn principal_equality() {
        assert_eq!(Principal::user("a"), Principal::user("a"));
        assert_ne!(Principal::user("a"), Principal::user("A"));
        assert_ne!(Principal::Internal, Principal::user("internal"));
    }

    #[test]
    fn principal_serde_shape() {
        let json = serde_json::to_string(&Principal::user("alice")).expect("serialize");
        assert_eq!(json, r#"{"kind":"user","name":"alice"}"#);

        let internal: Principal =
            serde_json::from_str(r#"{"kind":"internal"}"#).expect("deserialize");
        assert_eq!(internal, Principal::Internal);
    }
}
