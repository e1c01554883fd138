//! # Host-drained scheduler.
//!
//! [`DeferredQueue`] stores jobs in a FIFO queue until the host calls
//! [`DeferredQueue::run_pending`]. Use it when the emitter lives outside a tokio
//! runtime, or when tests need to control exactly when replays happen.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use recall_emitter::{DeferredQueue, Emit, EmitterConfig, EventsEmitter};
//!
//! let queue = Arc::new(DeferredQueue::new());
//! let emitter: EventsEmitter<&str> = EventsEmitter::builder(EmitterConfig::default())
//!     .with_scheduler(queue.clone())
//!     .build();
//!
//! emitter.remember("ready");
//! emitter.trigger("ready", &["now"]).unwrap();
//!
//! let seen = Arc::new(AtomicUsize::new(0));
//! let s = seen.clone();
//! emitter.on("ready", move |_, _| {
//!     s.fetch_add(1, Ordering::SeqCst);
//!     Ok(())
//! });
//!
//! assert_eq!(seen.load(Ordering::SeqCst), 0); // not replayed inline
//! assert_eq!(queue.run_pending(), 1);
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! ```

use std::collections::VecDeque;

use parking_lot::Mutex;

use super::schedule::{Deferred, Schedule};

/// FIFO queue of deferred jobs, drained explicitly by the host.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    jobs: Mutex<VecDeque<Deferred>>,
}

impl DeferredQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of jobs waiting.
    pub fn len(&self) -> usize {
        self.jobs.lock().len()
    }

    /// Returns true if no job is waiting.
    pub fn is_empty(&self) -> bool {
        self.jobs.lock().is_empty()
    }

    /// Runs queued jobs in order until the queue is empty, including jobs scheduled
    /// by the jobs themselves. Returns how many ran.
    ///
    /// The queue lock is released while each job runs. A panicking job unwinds to
    /// the caller; the jobs behind it stay queued.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.jobs.lock().pop_front();
            match next {
                Some(job) => {
                    tracing::trace!(job = %job.label(), "running deferred job");
                    job.run();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    /// Drops every waiting job without running it. Returns how many were dropped.
    pub fn discard(&self) -> usize {
        let mut jobs = self.jobs.lock();
        let n = jobs.len();
        jobs.clear();
        n
    }
}

impl DeferredQueue {
    /// Removes every queued job without running it, in FIFO order.
    pub(crate) fn take_all(&self) -> Vec<Deferred> {
        self.jobs.lock().drain(..).collect()
    }
}

impl Schedule for DeferredQueue {
    fn defer(&self, job: Deferred) {
        self.jobs.lock().push_back(job);
    }

    fn run_pending(&self) -> usize {
        DeferredQueue::run_pending(self)
    }

    fn name(&self) -> &'static str {
        "queue"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_fifo_and_nested_scheduling() {
        let queue = Arc::new(DeferredQueue::new());
        let log = Arc::new(Mutex::new(Vec::new()));

        let (q, l) = (queue.clone(), log.clone());
        queue.defer(Deferred::new("outer", move || {
            l.lock().push("outer");
            let l2 = l.clone();
            q.defer(Deferred::new("nested", move || l2.lock().push("nested")));
        }));
        let l = log.clone();
        queue.defer(Deferred::new("second", move || l.lock().push("second")));

        assert_eq!(queue.len(), 2);
        assert!(log.lock().is_empty());

        assert_eq!(queue.run_pending(), 3);
        assert_eq!(*log.lock(), vec!["outer", "second", "nested"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_discard() {
        let queue = DeferredQueue::new();
        queue.defer(Deferred::new("a", || panic!("must not run")));
        queue.defer(Deferred::new("b", || panic!("must not run")));

        assert_eq!(queue.discard(), 2);
        assert_eq!(queue.run_pending(), 0);
    }
}
