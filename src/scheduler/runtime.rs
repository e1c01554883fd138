//! # Tokio-backed scheduler.
//!
//! [`TokioScheduler`] forwards jobs over an unbounded channel to a single worker task
//! on a current-thread tokio runtime. One worker per scheduler keeps jobs in FIFO order.
//! Where no such runtime is running, jobs wait in a backlog.
//!
//! ## Architecture
//! ```text
//! defer(job)
//!   ├─ current-thread runtime ─► backlog + job ─► [unbounded mpsc] ─► worker task ─► job.run()
//!   │                                                                     └─► panic → logged
//!   └─ multi-thread / none    ─► backlog ─► run_pending() on the caller's thread
//! ```
//!
//! ## Rules
//! - On a current-thread runtime the worker only runs once the caller yields, so a job
//!   never overlaps the synchronous code that scheduled it.
//! - A multi-thread runtime would run the worker in parallel with the caller, so jobs
//!   are held in the backlog instead. The host drains them with
//!   [`Schedule::run_pending`] (or `Emit::run_pending` on the emitter).
//! - The backlog moves to the worker, ahead of the new job, on the first `defer` made
//!   from a current-thread runtime.
//! - A job is never dropped: if the worker cannot be reached it goes back to the backlog.
//!
//! ## Panic handling
//! The worker runs each job under `catch_unwind` so one panicking replay does not
//! stop later ones. Jobs drained by `run_pending` run on the caller's stack and a
//! panic propagates to it.
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if a listener panics while holding a lock.

use std::panic::{catch_unwind, AssertUnwindSafe};

use parking_lot::Mutex;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::mpsc;

use super::queue::DeferredQueue;
use super::schedule::{Deferred, Schedule};

/// Default scheduler: one FIFO worker task on a current-thread tokio runtime, with a
/// caller-drained backlog everywhere else.
#[derive(Debug, Default)]
pub struct TokioScheduler {
    tx: Mutex<Option<mpsc::UnboundedSender<Deferred>>>,
    backlog: DeferredQueue,
}

impl TokioScheduler {
    /// Creates a scheduler. No task is spawned until the first job arrives.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of jobs waiting for [`Schedule::run_pending`] or a current-thread runtime.
    pub fn pending(&self) -> usize {
        self.backlog.len()
    }

    fn spawn_worker(handle: &Handle) -> mpsc::UnboundedSender<Deferred> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Deferred>();

        handle.spawn(async move {
            while let Some(job) = rx.recv().await {
                let label = job.label().to_owned();
                if let Err(panic_err) = catch_unwind(AssertUnwindSafe(|| job.run())) {
                    let info = {
                        let any = &*panic_err;
                        if let Some(msg) = any.downcast_ref::<&'static str>() {
                            (*msg).to_string()
                        } else if let Some(msg) = any.downcast_ref::<String>() {
                            msg.clone()
                        } else {
                            "unknown panic".to_string()
                        }
                    };
                    tracing::error!(job = %label, panic = %info, "deferred job panicked");
                }
            }
        });
        tx
    }

    /// Sends `job` to the worker, respawning it on `handle` if its runtime is gone.
    fn send(
        &self,
        slot: &mut Option<mpsc::UnboundedSender<Deferred>>,
        handle: &Handle,
        job: Deferred,
    ) {
        let job = match slot.as_ref() {
            Some(tx) => match tx.send(job) {
                Ok(()) => return,
                // Worker is gone with its runtime.
                Err(mpsc::error::SendError(job)) => job,
            },
            None => job,
        };

        let tx = Self::spawn_worker(handle);
        match tx.send(job) {
            Ok(()) => *slot = Some(tx),
            Err(mpsc::error::SendError(job)) => {
                tracing::warn!(job = %job.label(), "worker unavailable, job held in backlog");
                self.backlog.defer(job);
            }
        }
    }
}

impl Schedule for TokioScheduler {
    fn defer(&self, job: Deferred) {
        let handle = match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::CurrentThread => handle,
            Ok(_) => {
                tracing::trace!(job = %job.label(), "multi-thread runtime, job held in backlog");
                self.backlog.defer(job);
                return;
            }
            Err(_) => {
                tracing::trace!(job = %job.label(), "no tokio runtime, job held in backlog");
                self.backlog.defer(job);
                return;
            }
        };

        let mut slot = self.tx.lock();
        for held in self.backlog.take_all() {
            self.send(&mut slot, &handle, held);
        }
        self.send(&mut slot, &handle, job);
    }

    fn run_pending(&self) -> usize {
        self.backlog.run_pending()
    }

    fn name(&self) -> &'static str {
        "tokio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc::error::TryRecvError;
    use tokio::sync::mpsc::unbounded_channel;

    #[tokio::test]
    async fn test_jobs_run_in_order() {
        let sched = TokioScheduler::new();
        let (tx, mut rx) = unbounded_channel::<u32>();

        for i in 0..5 {
            let tx = tx.clone();
            sched.defer(Deferred::new("order", move || {
                let _ = tx.send(i);
            }));
        }

        let mut got = Vec::new();
        for _ in 0..5 {
            let v = tokio::time::timeout(Duration::from_secs(1), rx.recv())
                .await
                .expect("job did not run")
                .expect("channel open");
            got.push(v);
        }
        assert_eq!(got, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_job_never_runs_inline() {
        let sched = TokioScheduler::new();
        let (tx, mut rx) = unbounded_channel::<()>();

        sched.defer(Deferred::new("inline", move || {
            let _ = tx.send(());
        }));
        assert!(rx.try_recv().is_err(), "job ran inside defer()");

        tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("job did not run");
    }

    #[tokio::test]
    async fn test_worker_survives_panicking_job() {
        let sched = TokioScheduler::new();
        let (tx, mut rx) = unbounded_channel::<&'static str>();

        sched.defer(Deferred::new("boom", || panic!("boom")));
        sched.defer(Deferred::new("after", move || {
            let _ = tx.send("after");
        }));

        let v = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("worker died")
            .expect("channel open");
        assert_eq!(v, "after");
    }

    #[test]
    fn test_defer_without_runtime_holds_job() {
        let sched = TokioScheduler::new();
        let (tx, mut rx) = unbounded_channel::<()>();

        sched.defer(Deferred::new("held", move || {
            let _ = tx.send(());
        }));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
        assert_eq!(sched.pending(), 1);

        assert_eq!(sched.run_pending(), 1);
        assert_eq!(rx.try_recv(), Ok(()));
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn test_backlog_moves_to_worker_ahead_of_new_job() {
        let sched = TokioScheduler::new();
        let (tx, mut rx) = unbounded_channel::<u32>();

        let first = tx.clone();
        sched.defer(Deferred::new("first", move || {
            let _ = first.send(1);
        }));
        assert_eq!(sched.pending(), 1);

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        let got = rt.block_on(async {
            sched.defer(Deferred::new("second", move || {
                let _ = tx.send(2);
            }));
            assert_eq!(sched.pending(), 0);

            let mut got = Vec::new();
            for _ in 0..2 {
                let v = tokio::time::timeout(Duration::from_secs(1), rx.recv())
                    .await
                    .expect("job did not run")
                    .expect("channel open");
                got.push(v);
            }
            got
        });
        assert_eq!(got, vec![1, 2]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_multi_thread_runtime_holds_jobs_for_caller() {
        let sched = TokioScheduler::new();
        let (tx, mut rx) = unbounded_channel::<()>();

        sched.defer(Deferred::new("held", move || {
            let _ = tx.send(());
        }));
        // Idle workers must not pick the job up while this code runs.
        std::thread::sleep(Duration::from_millis(100));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));

        assert_eq!(sched.run_pending(), 1);
        assert_eq!(rx.try_recv(), Ok(()));
    }
}
