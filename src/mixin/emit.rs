//! # The emitter operation set.
//!
//! [`Emit`] is the one place the emitter's operations are defined. Every method has a
//! default body that forwards to the [`EventsEmitter`] returned by [`Emit::emitter`];
//! implementors supply only that accessor.
//!
//! - [`EventsEmitter`] implements it by returning itself.
//! - [`Mixin`](crate::Mixin) implements it for any host value paired with an emitter.
//! - A host type can implement it directly for an emitter stored in one of its fields.
//!
//! ## Example
//! ```rust
//! use recall_emitter::{Emit, EventsEmitter};
//!
//! struct Download {
//!     url: String,
//!     events: EventsEmitter<u64>,
//! }
//!
//! impl Emit<u64> for Download {
//!     fn emitter(&self) -> &EventsEmitter<u64> {
//!         &self.events
//!     }
//! }
//!
//! let dl = Download { url: "https://example.org/a.iso".into(), events: EventsEmitter::new() };
//! dl.on("progress", |_, bytes| {
//!     println!("{} bytes", bytes[0]);
//!     Ok(())
//! });
//! assert!(dl.trigger("progress", &[1024]).unwrap());
//! assert_eq!(dl.url, "https://example.org/a.iso");
//! ```

use crate::core::{EventsEmitter, Memory};
use crate::error::{ListenerError, TriggerError};
use crate::listeners::{Callback, ClearOptions, Context, EventNames, ListenOptions, ListenerId};

/// Publish/subscribe operations, attachable to any type holding an [`EventsEmitter`].
pub trait Emit<A>
where
    A: Clone + Send + Sync + 'static,
{
    /// Returns the emitter these operations act on.
    fn emitter(&self) -> &EventsEmitter<A>;

    /// Registers `callback` for `event` with no limit and the root context.
    ///
    /// Returns the listener id. If `event` has remembered arguments, the listener also
    /// gets one deferred replay of them.
    fn on<F>(&self, event: &str, callback: F) -> Option<ListenerId>
    where
        F: Fn(&Context, &[A]) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.on_callback(event, Callback::new(callback), ListenOptions::default())
    }

    /// Registers `callback` for `event` with the given repeat limit and context.
    ///
    /// Returns `None`, registering nothing, when `options.times == Some(0)`.
    fn on_with<F>(&self, event: &str, callback: F, options: ListenOptions) -> Option<ListenerId>
    where
        F: Fn(&Context, &[A]) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.on_callback(event, Callback::new(callback), options)
    }

    /// Registers an existing [`Callback`]. Every other registration method ends here.
    fn on_callback(
        &self,
        event: &str,
        callback: Callback<A>,
        options: ListenOptions,
    ) -> Option<ListenerId> {
        self.emitter().inner.add_listener(event, callback, options)
    }

    /// Registers a listener that runs at most once.
    fn once<F>(&self, event: &str, callback: F) -> Option<ListenerId>
    where
        F: Fn(&Context, &[A]) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.once_with(event, callback, ListenOptions::default())
    }

    /// Registers a listener that runs at most once, bound to `options.context`.
    ///
    /// `options.times` is ignored.
    fn once_with<F>(&self, event: &str, callback: F, options: ListenOptions) -> Option<ListenerId>
    where
        F: Fn(&Context, &[A]) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.on_callback(event, Callback::new(callback), options.times(1))
    }

    /// Removes a listener. Returns `false` if `id` was never issued or already removed.
    ///
    /// The id stays in its event's binding as a ghost until a clear compacts it.
    fn off(&self, id: ListenerId) -> bool {
        self.emitter().inner.off(id)
    }

    /// Dispatches `args` to every listener bound to `event`, in registration order.
    ///
    /// Remembered events capture `args` first, even without listeners. Returns
    /// `Ok(false)` if `event` has no binding. A failing listener stops the dispatch and
    /// its error is returned.
    fn trigger(&self, event: &str, args: &[A]) -> Result<bool, TriggerError> {
        self.emitter().inner.trigger(event, args)
    }

    /// Live callbacks bound to `event`, in registration order. Ghosts are skipped.
    fn listeners(&self, event: &str) -> Vec<Callback<A>> {
        self.emitter().inner.listeners(event)
    }

    /// Starts remembering the latest arguments of each event.
    fn remember(&self, events: impl EventNames) {
        self.emitter().inner.remember(events.into_names())
    }

    /// Stops remembering each event and drops its arguments.
    fn forget(&self, events: impl EventNames) {
        self.emitter().inner.forget(events.into_names())
    }

    /// Runs replays the scheduler holds for the caller, on the calling thread.
    ///
    /// Returns how many jobs ran. With the default scheduler this is needed outside
    /// a current-thread tokio runtime; see [`TokioScheduler`](crate::TokioScheduler).
    fn run_pending(&self) -> usize {
        self.emitter().inner.scheduler.run_pending()
    }

    /// Clears the listed events. See [`ClearOptions`] for the modes.
    fn clear(&self, events: impl EventNames, options: ClearOptions) {
        self.emitter()
            .inner
            .clear(Some(events.into_names()), options)
    }

    /// Clears every event that has a binding.
    fn clear_all(&self, options: ClearOptions) {
        self.emitter().inner.clear(None, options)
    }

    /// Raw binding of `event` in registration order, ghosts included.
    fn binding(&self, event: &str) -> Option<Vec<ListenerId>> {
        self.emitter().inner.binding(event)
    }

    /// Returns true if `id` names a live listener.
    fn is_live(&self, id: ListenerId) -> bool {
        self.emitter().inner.is_live(id)
    }

    /// Invocations left for a limited listener; `None` if unlimited or not live.
    fn remaining(&self, id: ListenerId) -> Option<u32> {
        self.emitter().inner.remaining(id)
    }

    /// Number of live listeners across all events.
    fn listener_count(&self) -> usize {
        self.emitter().inner.listener_count()
    }

    /// Memory state of `event`, or `None` if it is not remembered.
    fn memory(&self, event: &str) -> Option<Memory<A>> {
        self.emitter().inner.memory(event)
    }

    /// Sorted names of every event with a binding.
    fn events(&self) -> Vec<String> {
        self.emitter().inner.events()
    }
}
