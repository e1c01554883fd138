//! # Deferred execution for memory replay.
//!
//! A listener that subscribes to an event whose arguments are remembered gets one
//! replay of those arguments. The replay must not run inside the registration call,
//! so the emitter hands it to a [`Schedule`] implementation:
//!
//! ```text
//! on(event, cb) ──► Registry + Index
//!      │
//!      └─► Memory holds args? ──► Schedule::defer(Deferred) ──► ... later ...
//!                                                               └─► invoke(id, args)
//!                                                                   (skipped if id was removed)
//! ```
//!
//! ## Implementations
//! - [`TokioScheduler`] (default): FIFO worker task on a current-thread tokio runtime;
//!   elsewhere jobs wait for [`Schedule::run_pending`].
//! - [`DeferredQueue`]: FIFO queue the host drains with [`DeferredQueue::run_pending`].

mod queue;
mod runtime;
mod schedule;

pub use queue::DeferredQueue;
pub use runtime::TokioScheduler;
pub use schedule::{Deferred, Schedule};
