//! Permission level types.

use arbiter_types::ErrorCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The privilege tier granted for a resource.
///
/// Levels are totally ordered by increasing privilege:
///
/// ```text
/// None < ReadOnly < ReadWrite
/// ```
///
/// Callers check "at least X" semantics with ordinary comparison
/// operators or [`allows`](Self::allows).
///
/// # Text Form
///
/// | Level | Canonical | Also accepted when parsing |
/// |-------|-----------|----------------------------|
/// | `None` | `none` | `undefined` |
/// | `ReadOnly` | `ro` | `read-only`, `readonly` |
/// | `ReadWrite` | `rw` | `read-write`, `readwrite` |
///
/// Parsing is case-insensitive. Serde uses the same text form.
///
/// # Example
///
/// ```
/// use arbiter_auth::PermissionLevel;
///
/// assert!(PermissionLevel::None < PermissionLevel::ReadOnly);
/// assert!(PermissionLevel::ReadOnly < PermissionLevel::ReadWrite);
///
/// assert!(PermissionLevel::ReadWrite.allows(PermissionLevel::ReadOnly));
/// assert!(!PermissionLevel::ReadOnly.allows(PermissionLevel::ReadWrite));
///
/// let level: PermissionLevel = "RW".parse().unwrap();
/// assert_eq!(level, PermissionLevel::ReadWrite);
/// assert_eq!(level.to_string(), "rw");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "&'static str", try_from = "String")]
pub enum PermissionLevel {
    /// No access. The most restrictive level and the fallback when no
    /// grant applies.
    #[default]
    None,

    /// Reads allowed, writes denied.
    ReadOnly,

    /// Reads and writes allowed.
    ReadWrite,
}

impl PermissionLevel {
    /// All levels in ascending order.
    pub const ALL: [Self; 3] = [Self::None, Self::ReadOnly, Self::ReadWrite];

    /// Returns `true` if this level satisfies `required`.
    #[must_use]
    pub fn allows(self, required: Self) -> bool {
        self >= required
    }

    /// Returns `true` if reads are permitted.
    #[must_use]
    pub fn can_read(self) -> bool {
        self.allows(Self::ReadOnly)
    }

    /// Returns `true` if writes are permitted.
    #[must_use]
    pub fn can_write(self) -> bool {
        self.allows(Self::ReadWrite)
    }

    /// Returns the canonical short text form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ReadOnly => "ro",
            Self::ReadWrite => "rw",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a recognised permission level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid permission level '{0}': expected none, ro or rw")]
pub struct ParseLevelError(pub String);

impl ErrorCode for ParseLevelError {
    fn code(&self) -> &'static str {
        "AUTHZ_PARSE_LEVEL"
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

impl FromStr for PermissionLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "undefined" => Ok(Self::None),
            "ro" | "read-only" | "readonly" => Ok(Self::ReadOnly),
            "rw" | "read-write" | "readwrite" => Ok(Self::ReadWrite),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

impl From<PermissionLevel> for &'static str {
    fn from(level: PermissionLevel) -> Self {
        level.as_str()
    }
}

impl TryFrom<String> for PermissionLevel {
    type Error = ParseLevelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_total_and_ascending() {
        assert!(PermissionLevel::None < PermissionLevel::ReadOnly);
        assert!(PermissionLevel::ReadOnly < PermissionLevel::ReadWrite);
        assert!(PermissionLevel::None < PermissionLevel::ReadWrite);

        let mut shuffled = vec![
            PermissionLevel::ReadWrite,
            PermissionLevel::None,
            PermissionLevel::ReadOnly,
        ];
        shuffled.sort();
        assert_eq!(shuffled, PermissionLevel::ALL.to_vec());
    }

    #[test]
    fn nothing_sits_between_adjacent_levels() {
        for level in PermissionLevel::ALL {
            let between_none_and_ro =
                level > PermissionLevel::None && level < PermissionLevel::ReadOnly;
            let between_ro_and_rw =
                level > PermissionLevel::ReadOnly && level < PermissionLevel::ReadWrite;
            assert!(!between_none_and_ro && !between_ro_and_rw, "{level}");
        }
    }

    #[test]
    fn default_is_none() {
        assert_eq!(PermissionLevel::default(), PermissionLevel::None);
    }

    #[test]
    fn allows_matches_ordering() {
        for granted in PermissionLevel::ALL {
            for required in PermissionLevel::ALL {
                assert_eq!(granted.allows(required), granted >= required);
            }
        }
    }

    #[test]
    fn read_write_helpers() {
        assert!(!PermissionLevel::None.can_read());
        assert!(PermissionLevel::ReadOnly.can_read());
        assert!(!PermissionLevel::ReadOnly.can_write());
        assert!(PermissionLevel::ReadWrite.can_write());
    }

    #[test]
    fn parse_accepts_aliases_case_insensitively() {
        assert_eq!("none".parse(), Ok(PermissionLevel::None));
        assert_eq!("Undefined".parse(), Ok(PermissionLevel::None));
        assert_eq!("RO".parse(), Ok(PermissionLevel::ReadOnly));
        assert_eq!("read-only".parse(), Ok(PermissionLevel::ReadOnly));
        assert_eq!(" rw ".parse(), Ok(PermissionLevel::ReadWrite));
        assert_eq!("ReadWrite".parse(), Ok(PermissionLevel::ReadWrite));
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "admin".parse::<PermissionLevel>().expect_err("should reject");
        assert!(err.to_string().contains("admin"));
        arbiter_types::assert_error_code(&err, "AUTHZ_");
        assert_eq!(err.code(), "AUTHZ_PARSE_LEVEL");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn serde_uses_short_form() {
        let json = serde_json::to_string(&PermissionLevel::ReadOnly).expect("serialize");
        assert_eq!(json, "\"ro\"");

        let parsed: PermissionLevel = serde_json::from_str("\"read-write\"").expect("deserialize");
        assert_eq!(parsed, PermissionLevel::ReadWrite);

        assert!(serde_json::from_str::<PermissionLevel>("\"root\"").is_err());
    }
}
