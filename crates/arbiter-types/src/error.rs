//! Unified error interface for arbiter.
//!
//! All arbiter error types implement [`ErrorCode`] so that callers
//! (authorization gates, request handlers) can map failures to stable,
//! machine-readable codes without matching on concrete types.
//!
//! # Example
//!
//! ```
//! use arbiter_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum GateError {
//!     Denied,
//!     Busy,
//! }
//!
//! impl ErrorCode for GateError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Denied => "GATE_DENIED",
//!             Self::Busy => "GATE_BUSY",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Busy)
//!     }
//! }
//!
//! assert_eq!(GateError::Denied.code(), "GATE_DENIED");
//! assert!(GateError::Busy.is_recoverable());
//! ```

/// Machine-readable error code interface.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**: e.g., `"AUTHZ_NO_CONTEXT"`
/// - **Namespace-prefixed**: `AUTHZ_`, `CONFIG_`, `SOURCE_`
/// - **Stable**: codes are part of the API contract
///
/// # Recoverability
///
/// Authorization failures are never recoverable by retrying: the caller
/// needs a different identity or a different grant set. Transient I/O
/// failures while loading configuration are.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether retrying (or a user action) may resolve the error.
    fn is_recoverable(&self) -> bool;
}

/// Validates that an error code follows the naming conventions.
///
/// # Panics
///
/// Panics if the code is empty, lacks `expected_prefix`, or is not
/// UPPER_SNAKE_CASE.
///
/// # Example
///
/// ```
/// use arbiter_types::{assert_error_code, ErrorCode};
///
/// struct Oops;
///
/// impl ErrorCode for Oops {
///     fn code(&self) -> &'static str { "AUTHZ_OOPS" }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_code(&Oops, "AUTHZ_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Validates every error in `errors` with [`assert_error_code`].
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }

    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
