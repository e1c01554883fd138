//! # Listener registry - owner of every live listener.
//!
//! The registry maps a [`ListenerId`] to its record: callback, bound context and the
//! optional remaining-invocation budget.
//!
//! ## Rules
//! - Ids come from the registry's [`IdAllocator`] and are never reused.
//! - A record with a budget always has `remaining > 0`; the invocation that brings it
//!   to zero removes the record before the callback runs.
//! - The registry never calls a callback itself. [`Registry::take_invocation`] hands
//!   back what to call so the emitter can release its lock first.
//! - Removing an unknown id is a no-op that returns `None`.
//! - Removed records are handed back to the caller, which drops them after releasing
//!   its lock, so a captured value's `Drop` may re-enter the emitter.

use std::collections::HashMap;

use crate::listeners::{Callback, Context, IdAllocator, IdScope, ListenerId};

/// Stored state of one listener.
pub(crate) struct Record<A> {
    callback: Callback<A>,
    context: Context,
    /// Invocations left; `None` = unlimited.
    remaining: Option<u32>,
}

/// What to run for one invocation.
pub(crate) struct Invocation<A> {
    pub(crate) callback: Callback<A>,
    pub(crate) context: Context,
}

/// Id-keyed store of live listeners.
pub(crate) struct Registry<A> {
    records: HashMap<ListenerId, Record<A>>,
    ids: IdAllocator,
}

impl<A> Registry<A> {
    /// Creates an empty registry drawing ids from `scope`.
    pub(crate) fn new(scope: IdScope) -> Self {
        Self {
            records: HashMap::new(),
            ids: IdAllocator::new(scope),
        }
    }

    /// Stores a new listener and returns its id.
    ///
    /// `limit` must not be `Some(0)`; the emitter rejects that before calling here.
    pub(crate) fn register(
        &mut self,
        callback: Callback<A>,
        context: Context,
        limit: Option<u32>,
    ) -> ListenerId {
        debug_assert!(limit != Some(0), "zero-use listener reached the registry");

        let id = self.ids.next_id();
        self.records.insert(
            id,
            Record {
                callback,
                context,
                remaining: limit,
            },
        );
        id
    }

    /// Consumes one invocation of `id`.
    ///
    /// Returns `None` for an unknown id (a ghost). For a limited listener the budget
    /// is decremented and the record removed once it is spent.
    pub(crate) fn take_invocation(&mut self, id: ListenerId) -> Option<Invocation<A>> {
        let record = self.records.get_mut(&id)?;

        let exhausted = match record.remaining.as_mut() {
            Some(left) => {
                *left = left.saturating_sub(1);
                *left == 0
            }
            None => false,
        };

        if exhausted {
            let record = self.records.remove(&id)?;
            tracing::debug!(listener = %id, "listener exhausted");
            return Some(Invocation {
                callback: record.callback,
                context: record.context,
            });
        }

        Some(Invocation {
            callback: record.callback.clone(),
            context: record.context.clone(),
        })
    }

    /// Deletes a listener and returns its record, or `None` if it was not live.
    pub(crate) fn remove(&mut self, id: ListenerId) -> Option<Record<A>> {
        self.records.remove(&id)
    }

    /// Returns true if `id` names a live listener.
    #[inline]
    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.records.contains_key(&id)
    }

    /// Returns the callback of a live listener.
    pub(crate) fn callback(&self, id: ListenerId) -> Option<Callback<A>> {
        self.records.get(&id).map(|r| r.callback.clone())
    }

    /// Returns the remaining budget of a live listener (`None` if unknown or unlimited).
    pub(crate) fn remaining(&self, id: ListenerId) -> Option<u32> {
        self.records.get(&id).and_then(|r| r.remaining)
    }

    /// Number of live listeners.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::root_context;

    fn noop() -> Callback<()> {
        Callback::new(|_, _| Ok(()))
    }

    #[test]
    fn test_limited_listener_is_removed_on_last_use() {
        let mut reg = Registry::new(IdScope::Emitter);
        let id = reg.register(noop(), root_context(), Some(2));

        assert_eq!(reg.remaining(id), Some(2));
        assert!(reg.take_invocation(id).is_some());
        assert_eq!(reg.remaining(id), Some(1));
        assert!(reg.take_invocation(id).is_some());
        assert!(!reg.contains(id));
        assert!(reg.take_invocation(id).is_none());
    }

    #[test]
    fn test_unlimited_listener_stays() {
        let mut reg = Registry::new(IdScope::Emitter);
        let id = reg.register(noop(), root_context(), None);

        for _ in 0..10 {
            assert!(reg.take_invocation(id).is_some());
        }
        assert!(reg.contains(id));
        assert_eq!(reg.remaining(id), None);
    }

    #[test]
    fn test_remove_reports_existence() {
        let mut reg = Registry::new(IdScope::Emitter);
        let id = reg.register(noop(), root_context(), None);

        assert_eq!(reg.len(), 1);
        assert!(reg.remove(id).is_some());
        assert!(reg.remove(id).is_none());
        assert_eq!(reg.len(), 0);
    }

    #[test]
    fn test_invocation_carries_registered_callback() {
        let mut reg = Registry::new(IdScope::Emitter);
        let cb = noop();
        let id = reg.register(cb.clone(), root_context(), None);

        let inv = reg.take_invocation(id).expect("live");
        assert!(inv.callback.ptr_eq(&cb));
        assert!(reg.callback(id).expect("live").ptr_eq(&cb));
    }
}
