//! Context propagation across task and thread handoffs.
//!
//! Execution contexts never follow work to another task or thread on
//! their own. These helpers capture [`ExecutionContext::current`] at the
//! spawn site and re-activate it on the other side.

use arbiter_auth::ExecutionContext;
use std::future::Future;
use tokio::task::JoinHandle;

/// Spawns `future` on the tokio runtime with the caller's active context
/// (if any) installed in the new task's slot.
///
/// # Panics
///
/// Panics if called outside a tokio runtime, like [`tokio::spawn`].
///
/// # Example
///
/// ```
/// use arbiter_auth::ExecutionContext;
/// use arbiter_runtime::spawn_with_context;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let _scope = ExecutionContext::superuser_scope();
/// let inherited = spawn_with_context(async { ExecutionContext::current().is_some() })
///     .await
///     .unwrap();
/// assert!(inherited);
/// # }
/// ```
pub fn spawn_with_context<F>(future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    match ExecutionContext::current() {
        Some(ctx) => {
            tracing::debug!(exec_id = %ctx.id(), "propagating execution context to task");
            tokio::spawn(ExecutionContext::scope(ctx, future))
        }
        None => tokio::spawn(future),
    }
}

/// Runs `f` on tokio's blocking pool with the caller's active context
/// (if any) activated on the worker thread for the duration of `f`.
///
/// # Panics
///
/// Panics if called outside a tokio runtime, like
/// [`tokio::task::spawn_blocking`].
pub fn spawn_blocking_with_context<F, R>(f: F) -> JoinHandle<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let captured = ExecutionContext::current();
    tokio::task::spawn_blocking(move || match captured {
        Some(ctx) => ExecutionContext::with_active(ctx, f),
        None => f(),
    })
}
