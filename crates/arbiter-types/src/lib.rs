//! Core identity types for arbiter.
//!
//! This crate provides the identity primitives that the authorization
//! layer carries alongside a resolved grant set. It contains no
//! permission logic.
//!
//! # Crate Architecture
//!
//! ```text
//! arbiter-types    (Principal, UserName, DatabaseName, ExecutionId)  ◄── HERE
//!      ↑
//! arbiter-auth     (PermissionLevel, AuthorizationContext, ExecutionContext)
//!      ↑
//! arbiter-runtime  (config, static grant source, default gate)
//! ```
//!
//! # Example
//!
//! ```
//! use arbiter_types::{DatabaseName, ExecutionId, Principal, UserName};
//!
//! let alice = Principal::user("alice");
//! assert!(alice.is_user());
//! assert_eq!(alice.to_string(), "user:alice");
//!
//! let db = DatabaseName::new("sales");
//! assert_eq!(db.as_str(), "sales");
//!
//! // Every execution gets a distinct identifier
//! assert_ne!(ExecutionId::new(), ExecutionId::new());
//! # let _ = UserName::new("bob");
//! ```

mod error;
mod id;
mod principal;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{DatabaseName, ExecutionId, UserName};
pub use principal::Principal;
