//! # Registration and clearing options.
//!
//! - [`ListenOptions`]: repeat limit and bound context for a new listener.
//! - [`ClearOptions`]: bulk-removal mode (full or ghosts-only, hard or soft).

use super::callback::Context;

/// Options accepted by [`Emit::on_with`](crate::Emit::on_with) and
/// [`Emit::once_with`](crate::Emit::once_with).
///
/// ## Field semantics
/// - `times`: how many invocations the listener gets before it removes itself.
///   `None` = unlimited. `Some(0)` makes the registration a no-op.
/// - `context`: value passed as the first callback argument. `None` = the
///   emitter's root context.
#[derive(Clone, Default)]
pub struct ListenOptions {
    /// Invocation limit.
    pub times: Option<u32>,
    /// Bound execution context.
    pub context: Option<Context>,
}

impl ListenOptions {
    /// Empty options: unlimited, root context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the invocation limit.
    #[must_use]
    pub fn times(mut self, n: u32) -> Self {
        self.times = Some(n);
        self
    }

    /// Binds the listener to `context`.
    #[must_use]
    pub fn context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }
}

impl std::fmt::Debug for ListenOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenOptions")
            .field("times", &self.times)
            .field("context", &self.context.is_some())
            .finish()
    }
}

/// Options accepted by [`Emit::clear`](crate::Emit::clear) and
/// [`Emit::clear_all`](crate::Emit::clear_all).
///
/// | `ghosts` | `soft` | effect on each event                                            |
/// |----------|--------|-----------------------------------------------------------------|
/// | false    | false  | remove every listener, delete the binding                        |
/// | false    | true   | remove every listener, keep the binding (now all ghosts)         |
/// | true     | false  | drop ghost ids; delete the binding if nothing live remains       |
/// | true     | true   | drop ghost ids; keep the binding even if it is left empty        |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearOptions {
    /// Compact ghost ids instead of removing listeners.
    pub ghosts: bool,
    /// Keep the binding's key when it would otherwise be deleted.
    pub soft: bool,
}

impl ClearOptions {
    /// Full, hard clear.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ghost-compaction mode.
    pub fn ghosts() -> Self {
        Self {
            ghosts: true,
            soft: false,
        }
    }

    /// Sets soft mode.
    #[must_use]
    pub fn soft(mut self, soft: bool) -> Self {
        self.soft = soft;
        self
    }
}
