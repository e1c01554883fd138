//! # Deferred-task seam.
//!
//! Provides [`Schedule`], the extension point the emitter uses to run memory replays
//! outside the registration call, and [`Deferred`], the unit of work it schedules.
//!
//! ## Contract
//! - A job handed to [`Schedule::defer`] must **not** run inside that call.
//! - Jobs run in the order they were scheduled.
//! - There is no cancellation: a scheduled job either runs or is dropped with its
//!   scheduler. Jobs created by the emitter re-check the registry when they run,
//!   so a listener removed in the meantime is simply skipped.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use recall_emitter::{Deferred, Schedule};
//!
//! /// Collects jobs; the host runs them from its own event loop.
//! #[derive(Default)]
//! struct Outbox(Mutex<Vec<Deferred>>);
//!
//! impl Schedule for Outbox {
//!     fn defer(&self, job: Deferred) {
//!         self.0.lock().push(job);
//!     }
//!
//!     fn name(&self) -> &'static str { "outbox" }
//! }
//!
//! let outbox = Arc::new(Outbox::default());
//! outbox.defer(Deferred::new("hello", || println!("later")));
//! for job in outbox.0.lock().drain(..) {
//!     job.run();
//! }
//! ```

use std::borrow::Cow;
use std::fmt;

/// A unit of deferred work.
pub struct Deferred {
    label: Cow<'static, str>,
    job: Box<dyn FnOnce() + Send + 'static>,
}

impl Deferred {
    /// Wraps a closure. `label` identifies the job in logs.
    pub fn new<F>(label: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            label: label.into(),
            job: Box::new(f),
        }
    }

    /// Returns the job label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Runs the job, consuming it.
    pub fn run(self) {
        (self.job)()
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Runs [`Deferred`] jobs after the current synchronous call completes.
///
/// ### Implementation requirements
/// - Never run the job inline.
/// - Preserve scheduling order.
/// - Do not block the caller.
pub trait Schedule: Send + Sync + 'static {
    /// Queues a job for later execution.
    fn defer(&self, job: Deferred);

    /// Runs the jobs this scheduler holds for the caller, on the calling thread.
    ///
    /// Returns how many ran. Schedulers that run jobs on their own return 0, which is
    /// the default.
    fn run_pending(&self) -> usize {
        0
    }

    /// Returns the scheduler name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
