//! Runtime pieces around the arbiter authorization core.
//!
//! | Module | Provides |
//! |--------|----------|
//! | [`config`] | TOML + environment configuration of grants |
//! | [`source`] | [`StaticGrantSource`], a config-backed [`GrantSource`](arbiter_auth::GrantSource) |
//! | [`gate`] | [`DefaultGate`], the standard [`AccessGate`](arbiter_auth::AccessGate) |
//! | [`spawn`] | Context propagation into spawned tasks and blocking work |
//!
//! # Request Flow
//!
//! ```text
//! request start ──► StaticGrantSource::context_for(user, db)
//!                         │
//!                   ExecutionContext::scope(ctx, handler)   (or activate)
//!                         │
//!        handler ──► DefaultGate::check_resource("orders", rw)
//!                         │
//! request end   ──► scope ends, slot restored
//! ```
//!
//! # Example
//!
//! ```
//! use arbiter_auth::{AccessGate, ExecutionContext, GrantSource, PermissionLevel};
//! use arbiter_runtime::{config::ArbiterConfig, DefaultGate, StaticGrantSource};
//! use arbiter_types::{DatabaseName, UserName};
//!
//! let config = ArbiterConfig::from_toml(r#"
//! [users.alice.databases.sales.collections]
//! orders = "rw"
//! "*" = "ro"
//! "#).unwrap();
//!
//! let source = StaticGrantSource::from_config(&config);
//! let gate = DefaultGate::from_config(&config);
//!
//! let ctx = source
//!     .context_for(&UserName::new("alice"), &DatabaseName::new("sales"))
//!     .unwrap();
//!
//! ExecutionContext::with_active(ctx, || {
//!     assert!(gate.check_resource("orders", PermissionLevel::ReadWrite).is_ok());
//!     assert!(gate.check_resource("invoices", PermissionLevel::ReadWrite).is_err());
//! });
//! ```

pub mod config;
pub mod gate;
pub mod source;
pub mod spawn;

pub use config::{ArbiterConfig, ConfigError, ConfigLoader};
pub use gate::DefaultGate;
pub use source::{SourceError, StaticGrantSource};
pub use spawn::{spawn_blocking_with_context, spawn_with_context};
