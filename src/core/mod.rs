//! Emitter core: listener state and dispatch.
//!
//! The public API from this module is [`EventsEmitter`], its [`EmitterConfig`] and
//! builder, and the read-only [`Memory`] state.
//!
//! Internal modules:
//! - [`registry`]: listener records keyed by id, with invocation budgets;
//! - [`index`]: event name to bound ids, including ghost compaction;
//! - [`memory`]: remembered trigger arguments for replay;
//! - [`emitter`]: the façade that ties the three together and schedules replays.

mod builder;
mod config;
mod emitter;
mod index;
mod memory;
mod registry;

pub use builder::EmitterBuilder;
pub use config::EmitterConfig;
pub use emitter::EventsEmitter;
pub use memory::Memory;
