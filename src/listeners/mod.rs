//! # Listener-facing types.
//!
//! - [`ListenerId`], [`IdScope`] - registration handles and their id scope
//! - [`Callback`], [`Context`] - what a listener runs and what it is bound to
//! - [`ListenOptions`], [`ClearOptions`] - registration and bulk-removal options
//! - [`EventNames`] - "one event or several" arguments

mod callback;
mod id;
mod names;
mod options;

pub use callback::{root_context, Callback, Context, Root};
pub(crate) use id::IdAllocator;
pub use id::{IdScope, ListenerId};
pub use names::EventNames;
pub use options::{ClearOptions, ListenOptions};
