//! # Event index - event name to bound listener ids.
//!
//! Each known event maps to a [`Binding`]: a single id, or an ordered sequence of ids
//! once a second listener registers. Order is registration order and is the dispatch
//! order.
//!
//! ## Ghosts
//! Removing a listener (`off`, or a limited listener running out) only touches the
//! registry. Its id stays in the binding as a *ghost* until one of:
//! - [`EventIndex::clear`] drops the whole binding (unless soft),
//! - [`EventIndex::clear_ghosts`] compacts ghosts away.
//!
//! Ghosts are filtered at read time by the registry lookup, never dispatched.

use std::collections::HashMap;

use super::registry::{Record, Registry};
use crate::listeners::ListenerId;

/// Listener ids bound to one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Binding {
    /// Exactly one id.
    Single(ListenerId),
    /// Two or more ids in registration order, or whatever a soft clear left behind.
    Many(Vec<ListenerId>),
}

impl Binding {
    /// Bound ids in order, ghosts included.
    pub(crate) fn ids(&self) -> &[ListenerId] {
        match self {
            Binding::Single(id) => std::slice::from_ref(id),
            Binding::Many(ids) => ids,
        }
    }

    /// Number of bound ids, ghosts included.
    pub(crate) fn len(&self) -> usize {
        self.ids().len()
    }

    fn push(&mut self, id: ListenerId) {
        match self {
            Binding::Single(first) => *self = Binding::Many(vec![*first, id]),
            Binding::Many(ids) => ids.push(id),
        }
    }
}

/// Event name → [`Binding`].
#[derive(Debug, Default)]
pub(crate) struct EventIndex {
    bindings: HashMap<String, Binding>,
}

impl EventIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends `id` to the binding of `event`.
    pub(crate) fn add(&mut self, event: &str, id: ListenerId) {
        match self.bindings.get_mut(event) {
            Some(binding) => binding.push(id),
            None => {
                self.bindings.insert(event.to_owned(), Binding::Single(id));
            }
        }
    }

    /// Snapshot of the ids bound to `event`, or `None` if the event has no binding.
    pub(crate) fn ids(&self, event: &str) -> Option<Vec<ListenerId>> {
        self.bindings.get(event).map(|b| b.ids().to_vec())
    }

    pub(crate) fn binding(&self, event: &str) -> Option<&Binding> {
        self.bindings.get(event)
    }

    /// Sorted snapshot of every event with a binding.
    pub(crate) fn events(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bindings.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Removes every listener bound to `event` from `registry`, then drops the
    /// binding unless `soft`. Returns the removed live records.
    pub(crate) fn clear<A>(
        &mut self,
        event: &str,
        soft: bool,
        registry: &mut Registry<A>,
    ) -> Vec<Record<A>> {
        let Some(binding) = self.bindings.get(event) else {
            return Vec::new();
        };

        let removed: Vec<Record<A>> = binding
            .ids()
            .iter()
            .filter_map(|id| registry.remove(*id))
            .collect();

        if !soft {
            self.bindings.remove(event);
        }
        removed
    }

    /// Drops ghost ids from the binding of `event`; live ids are untouched.
    ///
    /// If nothing is left and `soft` is false, the binding is deleted. With `soft`, an
    /// emptied binding is kept as an empty sequence. Returns how many ghosts were
    /// dropped.
    pub(crate) fn clear_ghosts<A>(&mut self, event: &str, soft: bool, registry: &Registry<A>) -> usize {
        let Some(binding) = self.bindings.get_mut(event) else {
            return 0;
        };

        let before = binding.len();
        let live: Vec<ListenerId> = binding
            .ids()
            .iter()
            .copied()
            .filter(|id| registry.contains(*id))
            .collect();
        let dropped = before - live.len();

        if live.is_empty() && !soft {
            self.bindings.remove(event);
        } else if dropped > 0 {
            *binding = Binding::Many(live);
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listeners::{root_context, Callback, IdScope};

    fn register(reg: &mut Registry<()>) -> ListenerId {
        reg.register(Callback::new(|_, _| Ok(())), root_context(), None)
    }

    #[test]
    fn test_add_upgrades_single_to_many() {
        let mut reg = Registry::new(IdScope::Emitter);
        let mut index = EventIndex::new();
        let a = register(&mut reg);
        let b = register(&mut reg);
        let c = register(&mut reg);

        index.add("event", a);
        assert_eq!(index.binding("event"), Some(&Binding::Single(a)));

        index.add("event", b);
        index.add("event", c);
        assert_eq!(index.binding("event"), Some(&Binding::Many(vec![a, b, c])));
        assert_eq!(index.ids("event"), Some(vec![a, b, c]));
        assert_eq!(index.ids("other"), None);
    }

    #[test]
    fn test_soft_clear_keeps_shape() {
        let mut reg = Registry::new(IdScope::Emitter);
        let mut index = EventIndex::new();
        for _ in 0..2 {
            let id = register(&mut reg);
            index.add("event", id);
        }

        assert_eq!(index.clear("event", true, &mut reg).len(), 2);
        assert_eq!(reg.len(), 0);
        assert_eq!(index.binding("event").map(Binding::len), Some(2));

        // Everything is a ghost now; a hard clear still drops the key.
        assert!(index.clear("event", false, &mut reg).is_empty());
        assert!(index.binding("event").is_none());
    }

    #[test]
    fn test_clear_ghosts_keeps_live_ids() {
        let mut reg = Registry::new(IdScope::Emitter);
        let mut index = EventIndex::new();
        let a = register(&mut reg);
        let b = register(&mut reg);
        let c = register(&mut reg);
        for id in [a, b, c] {
            index.add("event", id);
        }

        reg.remove(a);
        reg.remove(c);

        assert_eq!(index.clear_ghosts("event", false, &reg), 2);
        assert_eq!(index.binding("event"), Some(&Binding::Many(vec![b])));
        assert!(reg.contains(b));
    }

    #[test]
    fn test_clear_ghosts_drops_all_ghost_binding() {
        let mut reg = Registry::new(IdScope::Emitter);
        let mut index = EventIndex::new();
        let a = register(&mut reg);
        index.add("single", a);
        let b = register(&mut reg);
        let c = register(&mut reg);
        index.add("many", b);
        index.add("many", c);

        reg.remove(a);
        reg.remove(b);
        reg.remove(c);

        assert_eq!(index.clear_ghosts("single", false, &reg), 1);
        assert_eq!(index.clear_ghosts("many", true, &reg), 2);
        assert!(index.binding("single").is_none());
        assert_eq!(index.binding("many"), Some(&Binding::Many(vec![])));
        assert_eq!(index.events(), vec!["many".to_string()]);
    }

    #[test]
    fn test_unknown_event_is_noop() {
        let mut reg: Registry<()> = Registry::new(IdScope::Emitter);
        let mut index = EventIndex::new();
        assert!(index.clear("nope", false, &mut reg).is_empty());
        assert_eq!(index.clear_ghosts("nope", false, &reg), 0);
    }
}
