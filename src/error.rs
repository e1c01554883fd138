//! Error types used by the emitter and its listeners.
//!
//! This module defines two error enums:
//!
//! - [`ListenerError`] — returned by a listener callback that could not handle an event.
//! - [`TriggerError`] — returned by [`Emit::trigger`](crate::Emit::trigger) when a
//!   listener fails and dispatch is aborted.
//!
//! Misuse of the emitter itself (unknown ids, unknown events, `times == 0`) is never an
//! error: those calls degrade to `false`, `None` or a no-op.

use thiserror::Error;

use crate::listeners::ListenerId;

/// # Errors produced by listener callbacks.
///
/// A callback returns one of these to stop the current dispatch. The emitter does
/// not retry or isolate: the failure is handed to the caller of `trigger` and any
/// listener not yet reached in that call is skipped.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// The listener ran and failed.
    #[error("listener failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// The listener refused the arguments it was called with.
    #[error("listener rejected arguments: {reason}")]
    Rejected {
        /// Why the arguments were refused.
        reason: String,
    },
}

impl ListenerError {
    /// Shorthand for [`ListenerError::Failed`].
    pub fn failed(error: impl Into<String>) -> Self {
        ListenerError::Failed {
            error: error.into(),
        }
    }

    /// Shorthand for [`ListenerError::Rejected`].
    pub fn rejected(reason: impl Into<String>) -> Self {
        ListenerError::Rejected {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use recall_emitter::ListenerError;
    ///
    /// let err = ListenerError::failed("boom");
    /// assert_eq!(err.as_label(), "listener_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ListenerError::Failed { .. } => "listener_failed",
            ListenerError::Rejected { .. } => "listener_rejected",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ListenerError::Failed { error } => format!("error: {error}"),
            ListenerError::Rejected { reason } => format!("rejected: {reason}"),
        }
    }
}

/// # Errors produced by dispatch.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TriggerError {
    /// A listener failed; remaining listeners for this trigger were not invoked.
    #[error("listener {listener} on event {event:?} failed: {source}")]
    Listener {
        /// Event being dispatched.
        event: String,
        /// Listener that failed.
        listener: ListenerId,
        /// What the listener returned.
        #[source]
        source: ListenerError,
    },
}

impl TriggerError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use recall_emitter::{Emit, EventsEmitter, ListenerError, TriggerError};
    ///
    /// let emitter: EventsEmitter<u32> = EventsEmitter::new();
    /// emitter.on("tick", |_, _: &[u32]| Err(ListenerError::failed("boom")));
    ///
    /// let err = emitter.trigger("tick", &[1]).unwrap_err();
    /// assert_eq!(err.as_label(), "trigger_listener_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TriggerError::Listener { .. } => "trigger_listener_failed",
        }
    }

    /// Returns the listener that failed.
    pub fn listener(&self) -> ListenerId {
        match self {
            TriggerError::Listener { listener, .. } => *listener,
        }
    }

    /// Returns the error reported by the listener.
    pub fn listener_error(&self) -> &ListenerError {
        match self {
            TriggerError::Listener { source, .. } => source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listener_error_labels() {
        assert_eq!(ListenerError::failed("x").as_label(), "listener_failed");
        assert_eq!(ListenerError::rejected("x").as_label(), "listener_rejected");
        assert_eq!(ListenerError::rejected("bad arity").as_message(), "rejected: bad arity");
    }

    #[test]
    fn test_trigger_error_display_carries_source() {
        let err = TriggerError::Listener {
            event: "save".into(),
            listener: ListenerId::from_raw(7).expect("non-zero"),
            source: ListenerError::failed("disk full"),
        };
        assert_eq!(
            err.to_string(),
            "listener #7 on event \"save\" failed: listener failed: disk full"
        );
        assert_eq!(err.listener().get(), 7);
        assert_eq!(err.listener_error(), &ListenerError::failed("disk full"));
    }
}
