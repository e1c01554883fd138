//! # Memory store - remembered trigger arguments.
//!
//! An event is *armed* by [`Emit::remember`](crate::Emit::remember). From then on every
//! trigger of that event overwrites its stored arguments, even when nothing listens.
//! A listener registering while arguments are stored gets them replayed once.
//!
//! ```text
//! remember("ready")      → ready: Unfired
//! trigger("ready", [x])  → ready: Captured([x])
//! trigger("ready", [y])  → ready: Captured([y])
//! forget("ready")        → (absent)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

/// State of an armed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Memory<A> {
    /// Armed, not triggered since.
    Unfired,
    /// Arguments of the latest trigger.
    Captured(Arc<[A]>),
}

impl<A> Memory<A> {
    /// Captured arguments, if any.
    pub fn args(&self) -> Option<&[A]> {
        match self {
            Memory::Unfired => None,
            Memory::Captured(args) => Some(args),
        }
    }
}

#[derive(Debug)]
pub(crate) struct MemoryStore<A> {
    entries: HashMap<String, Memory<A>>,
}

impl<A: Clone> MemoryStore<A> {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Arms each event. Re-arming resets captured arguments to [`Memory::Unfired`].
    ///
    /// Returns the replaced states; the caller drops them outside its lock.
    pub(crate) fn arm(&mut self, events: Vec<String>) -> Vec<Memory<A>> {
        events
            .into_iter()
            .filter_map(|event| self.entries.insert(event, Memory::Unfired))
            .collect()
    }

    /// Stores `args` if `event` is armed and returns the state it replaced.
    /// `None` means the event is not armed and nothing was stored.
    pub(crate) fn capture(&mut self, event: &str, args: &[A]) -> Option<Memory<A>> {
        let slot = self.entries.get_mut(event)?;
        Some(std::mem::replace(slot, Memory::Captured(Arc::from(args))))
    }

    /// Un-arms each event and returns the removed states.
    pub(crate) fn forget(&mut self, events: Vec<String>) -> Vec<Memory<A>> {
        events
            .into_iter()
            .filter_map(|event| self.entries.remove(&event))
            .collect()
    }

    /// Arguments to replay to a new listener of `event`.
    pub(crate) fn captured(&self, event: &str) -> Option<Arc<[A]>> {
        match self.entries.get(event)? {
            Memory::Unfired => None,
            Memory::Captured(args) => Some(Arc::clone(args)),
        }
    }

    pub(crate) fn get(&self, event: &str) -> Option<Memory<A>> {
        self.entries.get(event).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_only_when_armed() {
        let mut mem: MemoryStore<&str> = MemoryStore::new();

        assert!(mem.capture("complete", &["Pavel"]).is_none());
        assert_eq!(mem.get("complete"), None);

        mem.arm(vec!["complete".into()]);
        assert_eq!(mem.get("complete"), Some(Memory::Unfired));
        assert_eq!(mem.captured("complete"), None);

        assert_eq!(mem.capture("complete", &["Pavel"]), Some(Memory::Unfired));
        assert_eq!(mem.captured("complete").as_deref(), Some(&["Pavel"][..]));
    }

    #[test]
    fn test_empty_args_are_still_captured() {
        let mut mem: MemoryStore<u8> = MemoryStore::new();
        mem.arm(vec!["loaded".into()]);
        mem.capture("loaded", &[]);

        let stored = mem.get("loaded").expect("armed");
        assert_eq!(stored.args(), Some(&[][..]));
    }

    #[test]
    fn test_rearm_and_forget() {
        let mut mem: MemoryStore<u8> = MemoryStore::new();
        mem.arm(vec!["a".into(), "b".into()]);
        mem.capture("a", &[1]);

        let replaced = mem.arm(vec!["a".into()]);
        assert_eq!(replaced, vec![Memory::Captured(Arc::from(&[1u8][..]))]);
        assert_eq!(mem.get("a"), Some(Memory::Unfired));

        assert_eq!(mem.forget(vec!["a".into(), "b".into(), "c".into()]).len(), 2);
        assert_eq!(mem.get("a"), None);
        assert_eq!(mem.get("b"), None);
    }
}
