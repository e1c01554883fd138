//! # Mixin: an arbitrary host value with an emitter attached.
//!
//! [`Mixin<T, A>`] pairs a host value with an [`EventsEmitter`]. It derefs to the host,
//! so the host's own fields and methods stay reachable, and it implements [`Emit`], so
//! the full operation set is available on the same value.
//!
//! ## Example
//! ```rust
//! use recall_emitter::{Emit, EventsEmitter};
//!
//! #[derive(Default)]
//! struct Player {
//!     name: String,
//! }
//!
//! let mut player = EventsEmitter::<String>::mixins(Player::default());
//! player.name = "Pavel".into();
//!
//! player.once("joined", |_, args| {
//!     assert_eq!(args, ["lobby".to_string()]);
//!     Ok(())
//! });
//! assert!(player.trigger("joined", &["lobby".to_string()]).unwrap());
//! assert_eq!(player.name, "Pavel");
//! ```

use std::fmt;
use std::ops::{Deref, DerefMut};

use super::emit::Emit;
use crate::core::EventsEmitter;

/// Host value `T` carrying the [`Emit`] operation set.
pub struct Mixin<T, A> {
    target: T,
    emitter: EventsEmitter<A>,
}

impl<T, A> Mixin<T, A>
where
    A: Clone + Send + Sync + 'static,
{
    /// Attaches a fresh default emitter to `target`.
    pub fn new(target: T) -> Self {
        Self::with_emitter(target, EventsEmitter::new())
    }

    /// Attaches an existing emitter (or a clone of one) to `target`.
    pub fn with_emitter(target: T, emitter: EventsEmitter<A>) -> Self {
        Self { target, emitter }
    }

    /// Returns the host value.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Detaches the emitter, returning the host value.
    pub fn into_inner(self) -> T {
        self.target
    }

    /// Splits into host value and emitter.
    pub fn into_parts(self) -> (T, EventsEmitter<A>) {
        (self.target, self.emitter)
    }
}

impl<T, A> Deref for Mixin<T, A> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.target
    }
}

impl<T, A> DerefMut for Mixin<T, A> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.target
    }
}

impl<T, A> Emit<A> for Mixin<T, A>
where
    A: Clone + Send + Sync + 'static,
{
    fn emitter(&self) -> &EventsEmitter<A> {
        &self.emitter
    }
}

impl<T: fmt::Debug, A> fmt::Debug for Mixin<T, A>
where
    A: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mixin")
            .field("target", &self.target)
            .field("emitter", &self.emitter)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::{ClearOptions, ListenOptions};
    use crate::scheduler::DeferredQueue;
    use crate::EmitterConfig;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Exercises every operation through `E`, so both host kinds run identical code.
    fn exercise<E: Emit<&'static str>>(host: &E) -> usize {
        let hits = Arc::new(AtomicUsize::new(0));

        let h = hits.clone();
        let id = host
            .on_with(
                "event",
                move |_, _| {
                    h.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                },
                ListenOptions::new().times(2),
            )
            .expect("registered");
        assert_eq!(host.remaining(id), Some(2));
        let h = hits.clone();
        host.once("event", move |_, _| {
            h.fetch_add(10, Ordering::SeqCst);
            Ok(())
        });

        host.remember("event");
        assert!(host.trigger("event", &["a"]).expect("dispatch"));
        assert!(host.trigger("event", &["b"]).expect("dispatch"));
        assert!(!host.is_live(id));
        assert_eq!(host.listeners("event").len(), 0);
        host.forget("event");

        host.clear("event", ClearOptions::ghosts());
        assert_eq!(host.binding("event"), None);
        assert!(!host.off(id));
        assert_eq!(host.run_pending(), 0);
        hits.load(Ordering::SeqCst)
    }

    #[test]
    fn test_mixin_matches_canonical_emitter() {
        let canonical: EventsEmitter<&'static str> = EventsEmitter::new();
        let mixed = EventsEmitter::<&'static str>::mixins(HashMap::<String, u32>::new());

        assert_eq!(exercise(&canonical), 12);
        assert_eq!(exercise(&mixed), 12);
    }

    #[test]
    fn test_mixin_derefs_to_host() {
        let mut mixed = EventsEmitter::<u8>::mixins(vec![1, 2]);
        mixed.push(3);
        assert_eq!(*mixed, vec![1, 2, 3]);
        assert_eq!(mixed.target().len(), 3);
        assert_eq!(mixed.into_inner(), vec![1, 2, 3]);
    }

    #[test]
    fn test_mixin_shares_given_emitter() {
        let queue = Arc::new(DeferredQueue::new());
        let emitter: EventsEmitter<u8> = EventsEmitter::builder(EmitterConfig::default())
            .with_scheduler(queue.clone())
            .build();
        let mixed = Mixin::with_emitter("host", emitter.clone());

        let id = mixed.on("x", |_, _| Ok(())).expect("registered");
        assert!(emitter.is_live(id));
        assert!(emitter.off(id));
        assert!(!mixed.is_live(id));

        let (host, detached) = mixed.into_parts();
        assert_eq!(host, "host");
        assert!(detached.same_emitter(&emitter));
    }
}
