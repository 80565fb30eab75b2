//! Grant configuration with layered loading.
//!
//! A static, file-based stand-in for the policy store that normally
//! populates grants. Suitable for development, tests and small
//! single-node deployments.
//!
//! # Layers
//!
//! ```text
//! Priority (highest to lowest):
//!
//! ┌──────────────────────────────────────────┐
//! │  1. ARBITER_EMPTY_SLOT                   │  Runtime override
//! ├──────────────────────────────────────────┤
//! │  2. File named by ARBITER_CONFIG         │
//! ├──────────────────────────────────────────┤
//! │  3. ConfigLoader::with_file (last wins)  │
//! ├──────────────────────────────────────────┤
//! │  4. Default values (compile-time)        │  Fallback
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `ARBITER_CONFIG` | Additional config file, applied after explicit files |
//! | `ARBITER_EMPTY_SLOT` | `deny` or `unrestricted` |
//!
//! # Example Configuration
//!
//! ```toml
//! empty_slot = "deny"
//!
//! [users.alice.databases.sales]
//! level = "rw"          # database level
//! default = "ro"        # collections without an entry
//!
//! [users.alice.databases.sales.collections]
//! orders = "rw"
//! secrets = "none"      # masks the default
//!
//! [users.alice.databases."*"]
//! level = "ro"          # any other database
//! ```

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::{ArbiterConfig, DatabaseGrants, UserConfig};

/// Environment variable naming an extra config file.
pub const ENV_CONFIG_PATH: &str = "ARBITER_CONFIG";

/// Environment variable overriding [`ArbiterConfig::empty_slot`].
pub const ENV_EMPTY_SLOT: &str = "ARBITER_EMPTY_SLOT";
