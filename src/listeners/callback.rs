//! # Listener callbacks and execution contexts.
//!
//! A [`Callback`] wraps a closure `Fn(&Context, &[A]) -> Result<(), ListenerError>`.
//! The first argument is the listener's bound [`Context`]; the second is the
//! argument list passed to `trigger` (or captured in memory, for a replay).
//!
//! Callbacks are reference-counted; cloning one is cheap and clones compare equal
//! under [`Callback::ptr_eq`], which is how [`Emit::listeners`](crate::Emit::listeners)
//! results are matched against what was registered.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use recall_emitter::{Callback, Context, ListenerError};
//!
//! let cb: Callback<i32> = Callback::new(|ctx: &Context, args: &[i32]| {
//!     let label = ctx.downcast_ref::<&str>().copied().unwrap_or("root");
//!     println!("{label}: {args:?}");
//!     Ok::<_, ListenerError>(())
//! });
//!
//! let same = cb.clone();
//! assert!(cb.ptr_eq(&same));
//! ```

use std::any::Any;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::error::ListenerError;

/// Execution context a listener is bound to.
///
/// Any shareable value can serve as a context; listeners recover it with
/// `downcast_ref`.
pub type Context = Arc<dyn Any + Send + Sync>;

/// Marker stored in the process-wide root context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Root;

static ROOT_CONTEXT: OnceLock<Context> = OnceLock::new();

/// Returns the process-wide root context.
///
/// Listeners registered without an explicit context (and on an emitter without a
/// configured root) are bound to this value. It downcasts to [`Root`].
pub fn root_context() -> Context {
    ROOT_CONTEXT.get_or_init(|| Arc::new(Root)).clone()
}

type CallbackFn<A> = dyn Fn(&Context, &[A]) -> Result<(), ListenerError> + Send + Sync;

/// Shared handle to a listener callback.
pub struct Callback<A> {
    f: Arc<CallbackFn<A>>,
}

impl<A> Callback<A> {
    /// Wraps a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Context, &[A]) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Invokes the callback bound to `context`.
    #[inline]
    pub fn call(&self, context: &Context, args: &[A]) -> Result<(), ListenerError> {
        (self.f)(context, args)
    }

    /// Returns true if both handles wrap the same closure.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl<A> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<A> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("ptr", &Arc::as_ptr(&self.f).cast::<()>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_context_is_shared() {
        let a = root_context();
        let b = root_context();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.downcast_ref::<Root>(), Some(&Root));
    }

    #[test]
    fn test_call_passes_context_and_args() {
        let cb: Callback<u8> = Callback::new(|ctx, args| {
            let limit = *ctx.downcast_ref::<usize>().expect("usize context");
            if args.len() > limit {
                return Err(ListenerError::rejected(format!("{} args", args.len())));
            }
            Ok(())
        });
        let ctx: Context = Arc::new(2usize);

        assert!(cb.call(&ctx, &[1, 2]).is_ok());
        assert_eq!(
            cb.call(&ctx, &[1, 2, 3]),
            Err(ListenerError::rejected("3 args"))
        );
    }

    #[test]
    fn test_ptr_eq_distinguishes_closures() {
        let a: Callback<()> = Callback::new(|_, _| Ok(()));
        let b: Callback<()> = Callback::new(|_, _| Ok(()));
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
    }
}
