//! Ambient execution contexts.
//!
//! An [`ExecutionContext`] answers "who is making this request" for code
//! that is not handed the identity explicitly. Contexts are activated for
//! the duration of a scope and are visible only where they were
//! activated:
//!
//! | Slot | Activated with | Visible to |
//! |------|----------------|------------|
//! | thread | [`ExecutionContext::activate`] → [`ExecScope`] guard | the current OS thread |
//! | task | [`ExecutionContext::scope`] | the wrapped future (one tokio task) |
//!
//! [`ExecutionContext::current`] returns the innermost activation. A
//! thread activation counts only for the tokio task that made it (or for
//! code outside any task, if made there), and only if it was made after
//! the task scope currently in force was entered. So a task scope entered
//! under a live thread guard shadows that guard, and a guard held by
//! `block_on` code is invisible to tasks spawned onto the same thread.
//! No slot value is ever shared between threads or tasks; work handed to
//! another thread or task must be re-activated there.
//!
//! # Scope Discipline
//!
//! Every activation is paired with exactly one deactivation by
//! construction: the only way to deactivate is to drop (or
//! [`exit`](ExecScope::exit)) the guard returned by `activate`. Dropping
//! restores whatever was active before, so nested activations behave as
//! a stack. This holds on early return, `?` propagation and panic
//! unwinding alike.
//!
//! ```text
//! activate(A)      [A]        current = A
//!   activate(B)    [A, B]     current = B
//!   drop           [A]        current = A
//! drop             []         current = None
//! ```
//!
//! `ExecScope` is `!Send`. Do not hold one across an `.await`; async code
//! uses [`ExecutionContext::scope`] instead.

use crate::{AuthorizationContext, PermissionLevel};
use arbiter_types::{DatabaseName, ExecutionId, Principal, UserName};
use std::cell::RefCell;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};
use tokio::task::Id as TaskId;

/// One thread activation.
struct Activation {
    ctx: Arc<ExecutionContext>,
    /// Task that activated it; `None` outside any tokio task.
    task: Option<TaskId>,
    seq: u64,
}

/// Value of the task slot.
struct TaskSlot {
    ctx: Arc<ExecutionContext>,
    /// Thread activations with a sequence number at or below this are
    /// shadowed by the slot.
    entered: u64,
}

thread_local! {
    static ACTIVE: RefCell<Vec<Activation>> = const { RefCell::new(Vec::new()) };
}

tokio::task_local! {
    static TASK_ACTIVE: TaskSlot;
}

/// Orders activations and task scope entries across threads.
static SEQ: AtomicU64 = AtomicU64::new(1);

fn next_seq() -> u64 {
    SEQ.fetch_add(1, Ordering::Relaxed)
}

static SUPERUSER: LazyLock<Arc<ExecutionContext>> = LazyLock::new(|| {
    Arc::new(ExecutionContext::new(
        Principal::Internal,
        DatabaseName::system(),
        AuthorizationContext::unrestricted(),
    ))
});

/// The identity and authorization state of one logical task.
///
/// The principal and database are metadata: they are carried for callers
/// and log records but play no part in level resolution, which is
/// delegated to the wrapped [`AuthorizationContext`].
///
/// # Example
///
/// ```
/// use arbiter_auth::{AuthorizationContext, ExecutionContext, GrantSet, PermissionLevel};
/// use arbiter_types::{DatabaseName, Principal};
/// use std::sync::Arc;
///
/// let ctx = Arc::new(ExecutionContext::new(
///     Principal::user("alice"),
///     DatabaseName::new("sales"),
///     AuthorizationContext::new(GrantSet::new().with_default(PermissionLevel::ReadOnly)),
/// ));
///
/// assert!(ExecutionContext::current().is_none());
/// {
///     let _scope = ExecutionContext::activate(Arc::clone(&ctx));
///     let active = ExecutionContext::current().unwrap();
///     assert_eq!(active.resolve_level("orders"), PermissionLevel::ReadOnly);
/// }
/// assert!(ExecutionContext::current().is_none());
/// ```
#[derive(Debug)]
pub struct ExecutionContext {
    id: ExecutionId,
    principal: Principal,
    database: DatabaseName,
    authz: Arc<AuthorizationContext>,
}

impl ExecutionContext {
    /// Creates a context with a fresh [`ExecutionId`].
    ///
    /// `authz` may be an owned [`AuthorizationContext`] or an `Arc` shared
    /// with a cache.
    #[must_use]
    pub fn new(
        principal: Principal,
        database: DatabaseName,
        authz: impl Into<Arc<AuthorizationContext>>,
    ) -> Self {
        Self {
            id: ExecutionId::new(),
            principal,
            database,
            authz: authz.into(),
        }
    }

    /// Returns the process-wide internal superuser context.
    ///
    /// The same `Arc` is returned on every call.
    #[must_use]
    pub fn superuser() -> Arc<Self> {
        Arc::clone(&SUPERUSER)
    }

    /// Returns this execution's identifier.
    #[must_use]
    pub fn id(&self) -> ExecutionId {
        self.id
    }

    /// Returns the acting principal.
    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Returns the user name, or `None` for internal executions.
    #[must_use]
    pub fn user(&self) -> Option<&UserName> {
        self.principal.user_name()
    }

    /// Returns the database this execution is scoped to.
    #[must_use]
    pub fn database(&self) -> &DatabaseName {
        &self.database
    }

    /// Returns the authorization state.
    #[must_use]
    pub fn authz(&self) -> &Arc<AuthorizationContext> {
        &self.authz
    }

    /// Resolves the effective level for `resource`.
    ///
    /// See [`AuthorizationContext::resolve_level`].
    #[must_use]
    pub fn resolve_level(&self, resource: &str) -> PermissionLevel {
        self.authz.resolve_level(resource)
    }

    /// Returns `true` for an internal execution with unrestricted access.
    #[must_use]
    pub fn is_superuser(&self) -> bool {
        self.principal.is_internal() && self.authz.is_unrestricted()
    }

    /// Returns `true` for the superuser, or for a user with read-write
    /// access to the system database.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_superuser()
            || (self.database.is_system() && self.authz.database_level().can_write())
    }

    /// Returns `true` if this execution may use `database` at `required`.
    ///
    /// Only the execution's own database is known to this context; any
    /// other database is denied unless the execution is the superuser.
    #[must_use]
    pub fn can_use_database(&self, database: &DatabaseName, required: PermissionLevel) -> bool {
        if self.is_superuser() {
            return true;
        }
        database == &self.database && self.authz.database_level().allows(required)
    }

    /// Returns `true` if this execution may use `resource` at `required`.
    #[must_use]
    pub fn can_use_resource(&self, resource: &str, required: PermissionLevel) -> bool {
        self.is_superuser() || self.authz.can_use(resource, required)
    }

    /// Activates `ctx` on the current thread until the returned guard is
    /// dropped.
    ///
    /// Activation cannot fail. Nested activations shadow outer ones;
    /// dropping the inner guard restores the outer context.
    pub fn activate(ctx: Arc<Self>) -> ExecScope {
        let exec_id = ctx.id;
        let principal = ctx.principal.to_string();
        let activation = Activation {
            ctx,
            task: tokio::task::try_id(),
            seq: next_seq(),
        };
        let depth = ACTIVE.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push(activation);
            stack.len() - 1
        });
        tracing::debug!(exec_id = %exec_id, %principal, depth, "activated execution context");
        ExecScope {
            depth,
            exec_id,
            _not_send: PhantomData,
        }
    }

    /// Activates the superuser context on the current thread.
    pub fn superuser_scope() -> ExecScope {
        Self::activate(Self::superuser())
    }

    /// Runs `f` with `ctx` active on the current thread.
    ///
    /// The previous context is restored even if `f` panics.
    ///
    /// # Example
    ///
    /// ```
    /// use arbiter_auth::{AuthorizationContext, ExecutionContext};
    /// use arbiter_types::{DatabaseName, Principal};
    /// use std::sync::Arc;
    ///
    /// let ctx = Arc::new(ExecutionContext::new(
    ///     Principal::user("bob"),
    ///     DatabaseName::new("sales"),
    ///     AuthorizationContext::denied(),
    /// ));
    ///
    /// let user = ExecutionContext::with_active(ctx, || {
    ///     ExecutionContext::current().and_then(|c| c.user().cloned())
    /// });
    /// assert_eq!(user.unwrap().as_str(), "bob");
    /// assert!(ExecutionContext::current().is_none());
    /// ```
    pub fn with_active<R>(ctx: Arc<Self>, f: impl FnOnce() -> R) -> R {
        let _scope = Self::activate(ctx);
        f()
    }

    /// Runs `future` with `ctx` active in the task slot.
    ///
    /// The context is visible to the future wherever it is polled, but not
    /// to tasks it spawns. It shadows every activation made before the
    /// scope was entered, thread guards included. Nested scopes shadow
    /// outer ones and restore them on completion.
    pub async fn scope<F: Future>(ctx: Arc<Self>, future: F) -> F::Output {
        tracing::debug!(exec_id = %ctx.id, principal = %ctx.principal, "entering task scope");
        let slot = TaskSlot {
            ctx,
            entered: next_seq(),
        };
        TASK_ACTIVE.scope(slot, future).await
    }

    /// Returns the active context, if any.
    ///
    /// The innermost activation wins: a thread activation made by the
    /// current task after its task scope was entered, else the task slot.
    /// `None` is a normal state; what it means (unrestricted or deny-all)
    /// is decided by the calling gate.
    #[must_use]
    pub fn current() -> Option<Arc<Self>> {
        let task = tokio::task::try_id();
        let slot = TASK_ACTIVE
            .try_with(|slot| (Arc::clone(&slot.ctx), slot.entered))
            .ok();
        let entered = slot.as_ref().map_or(0, |(_, entered)| *entered);

        let thread_active = ACTIVE
            .try_with(|stack| {
                stack
                    .borrow()
                    .iter()
                    .rev()
                    .find(|a| a.task == task && a.seq > entered)
                    .map(|a| Arc::clone(&a.ctx))
            })
            .ok()
            .flatten();
        thread_active.or(slot.map(|(ctx, _)| ctx))
    }

    /// Number of thread activations currently stacked on this thread,
    /// whichever task made them.
    #[must_use]
    pub fn active_depth() -> usize {
        ACTIVE.try_with(|stack| stack.borrow().len()).unwrap_or(0)
    }
}

/// Guard for a thread activation. Dropping it restores the previously
/// active context.
///
/// Guards must be dropped in reverse order of creation. Dropping an outer
/// guard while an inner one is alive is a programming error: it panics in
/// debug builds, and in release builds it is logged and the slot is reset
/// to the state before the outer activation.
#[must_use = "the context is deactivated as soon as the scope is dropped"]
#[derive(Debug)]
pub struct ExecScope {
    depth: usize,
    exec_id: ExecutionId,
    _not_send: PhantomData<*const ()>,
}

impl ExecScope {
    /// Deactivates now. Equivalent to dropping the guard.
    pub fn exit(self) {
        drop(self);
    }

    /// Stack position of this activation (0 for the outermost).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Drop for ExecScope {
    fn drop(&mut self) {
        let depth = self.depth;
        let stacked = ACTIVE
            .try_with(|stack| {
                let mut stack = stack.borrow_mut();
                let len = stack.len();
                stack.truncate(depth);
                len
            })
            .unwrap_or(depth + 1);

        if stacked == depth + 1 {
            tracing::debug!(exec_id = %self.exec_id, depth, "deactivated execution context");
            return;
        }

        tracing::error!(
            exec_id = %self.exec_id,
            depth,
            stacked,
            "execution scope dropped out of order"
        );
        if cfg!(debug_assertions) && !std::thread::panicking() {
            panic!(
                "execution scope dropped out of order: depth {depth}, {stacked} contexts stacked"
            );
        }
    }
}
