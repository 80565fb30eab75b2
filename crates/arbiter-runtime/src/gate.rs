//! Default [`AccessGate`] implementation.

use crate::config::ArbiterConfig;
use arbiter_auth::{AccessGate, EmptySlotPolicy};

/// Standard authorization gate.
///
/// Reads the active [`ExecutionContext`](arbiter_auth::ExecutionContext)
/// and compares its resolved level with the level an operation requires.
/// The empty-slot behaviour comes from configuration.
///
/// # Example
///
/// ```
/// use arbiter_auth::{AccessGate, EmptySlotPolicy, ExecutionContext, PermissionLevel};
/// use arbiter_runtime::DefaultGate;
///
/// let gate = DefaultGate::new(EmptySlotPolicy::Deny);
/// assert!(gate.check_resource("orders", PermissionLevel::ReadOnly).is_err());
///
/// let _scope = ExecutionContext::superuser_scope();
/// assert!(gate.check_resource("orders", PermissionLevel::ReadWrite).is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultGate {
    empty_slot: EmptySlotPolicy,
}

impl DefaultGate {
    /// Creates a gate with the given empty-slot behaviour.
    #[must_use]
    pub fn new(empty_slot: EmptySlotPolicy) -> Self {
        Self { empty_slot }
    }

    /// Creates a gate configured from `config`.
    #[must_use]
    pub fn from_config(config: &ArbiterConfig) -> Self {
        Self::new(config.empty_slot_policy())
    }
}

impl AccessGate for DefaultGate {
    fn empty_slot(&self) -> EmptySlotPolicy {
        self.empty_slot
    }
}
