//! # Listener identifiers.
//!
//! Every registration is assigned a [`ListenerId`] by an [`IdAllocator`]. Ids are
//! non-zero, unique and strictly increasing within the allocator's scope:
//!
//! - [`IdScope::Process`]: one counter shared by every emitter in the process, so ids
//!   from two emitters never collide.
//! - [`IdScope::Emitter`]: the counter belongs to a single registry.
//!
//! Ids are never reused, even after the listener they named has been removed.

use std::fmt;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// Process-wide counter for [`IdScope::Process`].
static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque handle returned by a successful registration.
///
/// Pass it to [`Emit::off`](crate::Emit::off) to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(NonZeroU64);

impl ListenerId {
    /// Rebuilds an id from its raw value. Returns `None` for `0`.
    ///
    /// Useful when ids travel through foreign code as plain integers; an id built
    /// this way that was never issued simply matches no listener.
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    /// Returns the raw numeric value.
    #[inline]
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which counter hands out listener ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdScope {
    /// Shared by all emitters in the process.
    #[default]
    Process,
    /// Owned by one emitter.
    Emitter,
}

/// Monotonic id source for one registry.
#[derive(Debug)]
pub(crate) struct IdAllocator {
    scope: IdScope,
    next: u64,
}

impl IdAllocator {
    pub(crate) fn new(scope: IdScope) -> Self {
        Self { scope, next: 1 }
    }

    /// Issues the next id.
    pub(crate) fn next_id(&mut self) -> ListenerId {
        let raw = match self.scope {
            IdScope::Process => NEXT_LISTENER_ID.fetch_add(1, AtomicOrdering::Relaxed),
            IdScope::Emitter => {
                let raw = self.next;
                self.next += 1;
                raw
            }
        };
        // Both counters start at 1 and only grow.
        ListenerId(NonZeroU64::new(raw).unwrap_or(NonZeroU64::MIN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emitter_scope_starts_at_one() {
        let mut ids = IdAllocator::new(IdScope::Emitter);
        assert_eq!(ids.next_id().get(), 1);
        assert_eq!(ids.next_id().get(), 2);
        assert_eq!(ids.next_id().get(), 3);
    }

    #[test]
    fn test_process_scope_never_collides() {
        let mut a = IdAllocator::new(IdScope::Process);
        let mut b = IdAllocator::new(IdScope::Process);

        let first = a.next_id();
        let second = b.next_id();
        let third = a.next_id();

        assert_ne!(first, second);
        assert!(first < second, "ids must grow across allocators");
        assert!(second < third);
    }

    #[test]
    fn test_from_raw_rejects_zero() {
        assert!(ListenerId::from_raw(0).is_none());
        assert_eq!(ListenerId::from_raw(42).map(ListenerId::get), Some(42));
        assert_eq!(ListenerId::from_raw(5).expect("non-zero").to_string(), "#5");
    }
}
