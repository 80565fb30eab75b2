//! Configuration types.
//!
//! All types implement [`Default`] for compile-time fallback values.

use arbiter_auth::{AuthorizationContext, EmptySlotPolicy, GrantSet, PermissionLevel};
use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main configuration structure.
///
/// This is the unified configuration after merging all layers.
///
/// # Example
///
/// ```
/// use arbiter_runtime::config::ArbiterConfig;
/// use arbiter_auth::{EmptySlotPolicy, PermissionLevel};
///
/// let config = ArbiterConfig::from_toml(r#"
/// empty_slot = "unrestricted"
///
/// [users.alice.databases.sales]
/// level = "rw"
/// default = "ro"
///
/// [users.alice.databases.sales.collections]
/// orders = "rw"
/// "#).unwrap();
///
/// assert_eq!(config.empty_slot_policy(), EmptySlotPolicy::Unrestricted);
/// let sales = &config.users["alice"].databases["sales"];
/// assert_eq!(sales.to_authorization().resolve_level("orders"), PermissionLevel::ReadWrite);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ArbiterConfig {
    /// Gate behaviour when no execution context is active.
    ///
    /// `None` means no layer set it; see [`Self::empty_slot_policy`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_slot: Option<EmptySlotPolicy>,

    /// Grants per user name.
    pub users: BTreeMap<String, UserConfig>,
}

impl ArbiterConfig {
    /// Creates a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective empty-slot policy. Unset resolves to
    /// [`EmptySlotPolicy::Deny`].
    #[must_use]
    pub fn empty_slot_policy(&self) -> EmptySlotPolicy {
        self.empty_slot.unwrap_or_default()
    }

    /// Serializes to TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Deserializes from TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if the TOML is malformed or contains an unknown
    /// permission level.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Merges another config into this one. `other` takes precedence.
    ///
    /// An `empty_slot` set in `other` always wins, including an explicit
    /// `deny` over an earlier `unrestricted`.
    ///
    /// Users are replaced whole: a later layer that mentions a user
    /// defines all of that user's grants.
    pub fn merge(&mut self, other: &Self) {
        if other.empty_slot.is_some() {
            self.empty_slot = other.empty_slot;
        }
        for (name, user) in &other.users {
            self.users.insert(name.clone(), user.clone());
        }
    }
}

/// Grants of one user, per database.
///
/// The database key `"*"` applies to every database without its own entry
/// when grants are looked up through
/// [`StaticGrantSource`](crate::StaticGrantSource).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct UserConfig {
    /// Grants keyed by database name (or `"*"`).
    pub databases: BTreeMap<String, DatabaseGrants>,
}

/// Grants of one user within one database.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseGrants {
    /// Level on the database itself.
    pub level: PermissionLevel,

    /// Level for collections without their own entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<PermissionLevel>,

    /// Per-collection levels.
    ///
    /// A `"*"` key is accepted as an alternative spelling of `default`;
    /// when both are present, `default` wins.
    pub collections: BTreeMap<String, PermissionLevel>,
}

impl DatabaseGrants {
    /// Builds the authorization context these grants describe.
    #[must_use]
    pub fn to_authorization(&self) -> AuthorizationContext {
        let mut grants = GrantSet::from_flat_map(
            self.collections
                .iter()
                .map(|(name, level)| (name.clone(), *level)),
        );
        if let Some(default) = self.default {
            grants = grants.with_default(default);
        }
        AuthorizationContext::new(grants).with_database_level(self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbiter_auth::WILDCARD;

    #[test]
    fn default_config_denies_empty_slot() {
        let config = ArbiterConfig::new();
        assert_eq!(config.empty_slot, None);
        assert_eq!(config.empty_slot_policy(), EmptySlotPolicy::Deny);
        assert!(config.users.is_empty());
    }

    #[test]
    fn empty_toml_is_default() {
        let config = ArbiterConfig::from_toml("").expect("parse empty");
        assert_eq!(config, ArbiterConfig::default());
    }

    #[test]
    fn wildcard_collection_key_becomes_default() {
        let config = ArbiterConfig::from_toml(
            r#"
[users.bob.databases.sales.collections]
"*" = "ro"
orders = "rw"
"#,
        )
        .expect("parse");

        let authz = config.users["bob"].databases["sales"].to_authorization();
        assert_eq!(authz.grants().default_level(), Some(PermissionLevel::ReadOnly));
        assert_eq!(authz.resolve_level("orders"), PermissionLevel::ReadWrite);
        assert_eq!(authz.resolve_level("invoices"), PermissionLevel::ReadOnly);
        assert_eq!(authz.database_level(), PermissionLevel::None);
    }

    #[test]
    fn explicit_default_wins_over_star_key() {
        let grants = DatabaseGrants {
            level: PermissionLevel::ReadOnly,
            default: Some(PermissionLevel::ReadWrite),
            collections: BTreeMap::from([("*".to_string(), PermissionLevel::None)]),
        };
        let authz = grants.to_authorization();
        assert_eq!(authz.resolve_level("anything"), PermissionLevel::ReadWrite);
        assert_eq!(authz.database_level(), PermissionLevel::ReadOnly);
    }

    #[test]
    fn wildcard_database_key_is_kept_verbatim() {
        let config = ArbiterConfig::from_toml(
            r#"
[users.carol.databases."*"]
level = "ro"
"#,
        )
        .expect("parse");

        let carol = &config.users["carol"];
        assert_eq!(carol.databases[WILDCARD].level, PermissionLevel::ReadOnly);
        assert!(!carol.databases.contains_key("sales"));
    }

    #[test]
    fn unknown_level_is_a_parse_error() {
        let result = ArbiterConfig::from_toml(
            r#"
[users.dave.databases.sales]
level = "superuser"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn merge_overrides_users_and_policy() {
        let mut base = ArbiterConfig::from_toml(
            r#"
[users.alice.databases.sales]
level = "ro"

[users.bob.databases.sales]
level = "ro"
"#,
        )
        .expect("parse base");

        let overlay = ArbiterConfig::from_toml(
            r#"
empty_slot = "unrestricted"

[users.alice.databases.hr]
level = "rw"
"#,
        )
        .expect("parse overlay");

        base.merge(&overlay);

        assert_eq!(base.empty_slot_policy(), EmptySlotPolicy::Unrestricted);
        assert!(base.users["alice"].databases.contains_key("hr"));
        assert!(!base.users["alice"].databases.contains_key("sales"));
        assert!(base.users.contains_key("bob"));
    }

    #[test]
    fn merge_explicit_deny_overrides_unrestricted() {
        let mut base =
            ArbiterConfig::from_toml(r#"empty_slot = "unrestricted""#).expect("parse base");
        let overlay = ArbiterConfig::from_toml(r#"empty_slot = "deny""#).expect("parse overlay");

        base.merge(&overlay);
        assert_eq!(base.empty_slot_policy(), EmptySlotPolicy::Deny);
    }

    #[test]
    fn merge_without_empty_slot_keeps_earlier_value() {
        let mut base =
            ArbiterConfig::from_toml(r#"empty_slot = "unrestricted""#).expect("parse base");
        let overlay = ArbiterConfig::from_toml(
            r#"
[users.alice.databases.sales]
level = "ro"
"#,
        )
        .expect("parse overlay");

        base.merge(&overlay);
        assert_eq!(base.empty_slot_policy(), EmptySlotPolicy::Unrestricted);
    }

    #[test]
    fn unknown_keys_are_parse_errors() {
        let typo = ArbiterConfig::from_toml(
            r#"
[users.alice.databases.sales]
levle = "rw"
"#,
        );
        assert!(typo.is_err());

        let flat_user = ArbiterConfig::from_toml(
            r#"
[users.alice]
database = "sales"
database_level = "rw"
"#,
        );
        assert!(flat_user.is_err());

        let top_level = ArbiterConfig::from_toml(r#"empty_slots = "deny""#);
        assert!(top_level.is_err());
    }

    #[test]
    fn toml_roundtrip() {
        let config = ArbiterConfig::from_toml(
            r#"
empty_slot = "unrestricted"

[users.alice.databases.sales]
level = "rw"
default = "ro"

[users.alice.databases.sales.collections]
orders = "rw"
secrets = "none"
"#,
        )
        .expect("parse");

        let text = config.to_toml().expect("serialize");
        let reparsed = ArbiterConfig::from_toml(&text).expect("reparse");
        assert_eq!(reparsed, config);
    }
}
