//! # EventsEmitter: registry, index and memory behind one handle.
//!
//! [`EventsEmitter`] composes the [`Registry`], the [`EventIndex`] and the
//! [`MemoryStore`] under a single lock and hands replays to a [`Schedule`]. Its public
//! operations are the [`Emit`] trait; the emitter implements that trait the same way
//! any host type does, by returning itself from [`Emit::emitter`].
//!
//! ## Architecture
//! ```text
//! on(event, cb) ─► Registry.register ─► Index.add ─► Memory captured? ─► Schedule::defer(replay)
//!
//! trigger(event, args)
//!   ├─► Memory.capture(event, args)          (armed events only)
//!   ├─► ids = Index.ids(event)               (snapshot; None → return false)
//!   └─► for id in ids:
//!         Registry.take_invocation(id)       (ghost → skip; last use → record removed)
//!         callback(context, args)?           (lock released; Err aborts dispatch)
//!
//! clear(events, {ghosts, soft})
//!   ├─ ghosts=false ─► Index.clear        (remove every id from Registry, drop key unless soft)
//!   └─ ghosts=true  ─► Index.clear_ghosts (compact ghost ids, drop key if empty unless soft)
//! ```
//!
//! ## Rules
//! - The state lock is never held while a callback runs; callbacks may call back into
//!   the emitter (register, remove, trigger, clear).
//! - Removed records and replaced memory are dropped after the lock is released, so
//!   a captured value's `Drop` may use the emitter too.
//! - A trigger dispatches to the ids bound when it started. Listeners added during
//!   dispatch wait for the next trigger; listeners removed during dispatch are skipped.
//! - Replays hold a weak handle: once every emitter handle is dropped they do nothing.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use super::builder::EmitterBuilder;
use super::config::EmitterConfig;
use super::index::EventIndex;
use super::memory::{Memory, MemoryStore};
use super::registry::Registry;
use crate::error::{ListenerError, TriggerError};
use crate::listeners::{Callback, ClearOptions, Context, IdScope, ListenOptions, ListenerId};
use crate::mixin::{Emit, Mixin};
use crate::scheduler::{Deferred, Schedule};

/// The three maps, guarded together.
pub(crate) struct State<A> {
    pub(crate) registry: Registry<A>,
    pub(crate) index: EventIndex,
    pub(crate) memory: MemoryStore<A>,
}

impl<A: Clone> State<A> {
    pub(crate) fn new(scope: IdScope) -> Self {
        Self {
            registry: Registry::new(scope),
            index: EventIndex::new(),
            memory: MemoryStore::new(),
        }
    }
}

pub(crate) struct Inner<A> {
    pub(crate) state: Mutex<State<A>>,
    pub(crate) root: Context,
    pub(crate) scheduler: Arc<dyn Schedule>,
}

impl<A> Inner<A>
where
    A: Clone + Send + Sync + 'static,
{
    pub(crate) fn add_listener(
        self: &Arc<Self>,
        event: &str,
        callback: Callback<A>,
        options: ListenOptions,
    ) -> Option<ListenerId> {
        let times = options.times;
        if times == Some(0) {
            tracing::debug!(event, "zero-use listener ignored");
            return None;
        }
        let context = options.context.unwrap_or_else(|| Arc::clone(&self.root));

        let (id, replay) = {
            let mut st = self.state.lock();
            let id = st.registry.register(callback, context, times);
            st.index.add(event, id);
            (id, st.memory.captured(event))
        };
        tracing::debug!(event, listener = %id, times = ?times, "listener registered");

        if let Some(args) = replay {
            self.schedule_replay(event, id, args);
        }
        Some(id)
    }

    fn schedule_replay(self: &Arc<Self>, event: &str, id: ListenerId, args: Arc<[A]>) {
        let weak = Arc::downgrade(self);
        let event_name = event.to_owned();

        tracing::debug!(event, listener = %id, args = args.len(), "replay scheduled");
        self.scheduler.defer(Deferred::new(
            format!("replay {id} on {event:?}"),
            move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                match inner.invoke(id, &args) {
                    Ok(true) => tracing::trace!(event = %event_name, listener = %id, "replayed"),
                    Ok(false) => {
                        tracing::trace!(event = %event_name, listener = %id, "replay skipped: listener gone")
                    }
                    Err(err) => tracing::warn!(
                        event = %event_name,
                        listener = %id,
                        label = err.as_label(),
                        error = %err,
                        "replay failed"
                    ),
                }
            },
        ));
    }

    /// Runs one invocation of `id`. `Ok(false)` if `id` is a ghost.
    pub(crate) fn invoke(&self, id: ListenerId, args: &[A]) -> Result<bool, ListenerError> {
        let call = self.state.lock().registry.take_invocation(id);
        let Some(call) = call else {
            return Ok(false);
        };
        call.callback.call(&call.context, args)?;
        Ok(true)
    }

    pub(crate) fn trigger(&self, event: &str, args: &[A]) -> Result<bool, TriggerError> {
        let (ids, replaced) = {
            let mut st = self.state.lock();
            let replaced = st.memory.capture(event, args);
            (st.index.ids(event), replaced)
        };
        drop(replaced);
        let Some(ids) = ids else {
            tracing::trace!(event, "trigger without binding");
            return Ok(false);
        };

        tracing::trace!(event, bound = ids.len(), "dispatching");
        for id in ids {
            self.invoke(id, args)
                .map_err(|source| TriggerError::Listener {
                    event: event.to_owned(),
                    listener: id,
                    source,
                })?;
        }
        Ok(true)
    }

    pub(crate) fn off(&self, id: ListenerId) -> bool {
        let removed = self.state.lock().registry.remove(id);
        let Some(record) = removed else {
            return false;
        };
        drop(record);
        tracing::debug!(listener = %id, "listener removed");
        true
    }

    pub(crate) fn listeners(&self, event: &str) -> Vec<Callback<A>> {
        let st = self.state.lock();
        match st.index.binding(event) {
            Some(binding) => binding
                .ids()
                .iter()
                .filter_map(|id| st.registry.callback(*id))
                .collect(),
            None => Vec::new(),
        }
    }

    pub(crate) fn remember(&self, events: Vec<String>) {
        tracing::debug!(events = ?events, "remembering");
        let replaced = self.state.lock().memory.arm(events);
        drop(replaced);
    }

    pub(crate) fn forget(&self, events: Vec<String>) {
        tracing::debug!(events = ?events, "forgetting");
        let removed = self.state.lock().memory.forget(events);
        drop(removed);
    }

    /// Clears `events`, or every bound event when `None`.
    pub(crate) fn clear(&self, events: Option<Vec<String>>, options: ClearOptions) {
        let mut st = self.state.lock();
        let events = events.unwrap_or_else(|| st.index.events());

        let State {
            registry, index, ..
        } = &mut *st;
        let mut affected = 0;
        let mut removed = Vec::new();
        for event in &events {
            if options.ghosts {
                affected += index.clear_ghosts(event, options.soft, registry);
            } else {
                let records = index.clear(event, options.soft, registry);
                affected += records.len();
                removed.extend(records);
            }
        }
        drop(st);
        drop(removed);

        tracing::debug!(
            events = events.len(),
            ghosts = options.ghosts,
            soft = options.soft,
            affected,
            "cleared"
        );
    }

    pub(crate) fn binding(&self, event: &str) -> Option<Vec<ListenerId>> {
        self.state.lock().index.ids(event)
    }

    pub(crate) fn is_live(&self, id: ListenerId) -> bool {
        self.state.lock().registry.contains(id)
    }

    pub(crate) fn remaining(&self, id: ListenerId) -> Option<u32> {
        self.state.lock().registry.remaining(id)
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.state.lock().registry.len()
    }

    pub(crate) fn memory(&self, event: &str) -> Option<Memory<A>> {
        self.state.lock().memory.get(event)
    }

    pub(crate) fn events(&self) -> Vec<String> {
        self.state.lock().index.events()
    }
}

/// In-process event emitter.
///
/// Cheap to clone: clones share the same listeners and memory. All operations come
/// from the [`Emit`] trait, so bring it into scope:
///
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use recall_emitter::{Emit, EventsEmitter, ListenOptions};
///
/// let emitter: EventsEmitter<String> = EventsEmitter::new();
/// let hits = Arc::new(AtomicU32::new(0));
///
/// let h = hits.clone();
/// let id = emitter
///     .on_with("save", move |_, _| {
///         h.fetch_add(1, Ordering::SeqCst);
///         Ok(())
///     }, ListenOptions::new().times(2))
///     .expect("times >= 1");
///
/// for _ in 0..3 {
///     assert!(emitter.trigger("save", &["doc".to_string()]).unwrap());
/// }
/// assert_eq!(hits.load(Ordering::SeqCst), 2);
/// assert!(!emitter.is_live(id));
/// assert!(!emitter.off(id));
/// ```
pub struct EventsEmitter<A> {
    pub(crate) inner: Arc<Inner<A>>,
}

impl<A> EventsEmitter<A>
where
    A: Clone + Send + Sync + 'static,
{
    /// Creates an emitter with default configuration and the tokio scheduler.
    ///
    /// Replays run by themselves on a current-thread tokio runtime. Anywhere else they
    /// wait for [`Emit::run_pending`].
    pub fn new() -> Self {
        Self::builder(EmitterConfig::default()).build()
    }

    /// Starts building an emitter.
    pub fn builder(cfg: EmitterConfig) -> EmitterBuilder<A> {
        EmitterBuilder::new(cfg)
    }

    pub(crate) fn from_inner(inner: Arc<Inner<A>>) -> Self {
        Self { inner }
    }

    /// Attaches a fresh emitter to `target`.
    ///
    /// The returned [`Mixin`] derefs to `target` and implements [`Emit`].
    pub fn mixins<T>(target: T) -> Mixin<T, A> {
        Mixin::new(target)
    }

    /// Returns true if both handles share the same state.
    pub fn same_emitter(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<A> Clone for EventsEmitter<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> Default for EventsEmitter<A>
where
    A: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for EventsEmitter<A>
where
    A: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventsEmitter")
            .field("listeners", &self.inner.listener_count())
            .field("events", &self.inner.events().len())
            .field("scheduler", &self.inner.scheduler.name())
            .finish()
    }
}

impl<A> Emit<A> for EventsEmitter<A>
where
    A: Clone + Send + Sync + 'static,
{
    fn emitter(&self) -> &EventsEmitter<A> {
        self
    }
}
