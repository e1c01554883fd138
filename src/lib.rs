//! # recall-emitter
//!
//! **recall-emitter** is an in-process publish/subscribe event emitter for Rust.
//!
//! Listeners subscribe to named events and may be limited to a number of calls, bound
//! to an execution context, removed one by one or in bulk, and replayed the latest
//! arguments of a *remembered* event when they subscribe late.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!                 ┌──────────────────────────────────────────────────┐
//!  on / once ────►│ EventsEmitter (implements Emit)                  │
//!  off       ────►│                                                  │
//!  trigger   ────►│   ┌────────────┐  ┌────────────┐  ┌────────────┐ │
//!  clear     ────►│   │  Registry  │  │ EventIndex │  │MemoryStore │ │
//!  remember  ────►│   │ id → (cb,  │  │ event →    │  │ event →    │ │
//!  forget    ────►│   │  ctx, left)│  │  id | [id] │  │  args      │ │
//!                 │   └────────────┘  └────────────┘  └─────┬──────┘ │
//!                 └─────────────────────────────────────────┼────────┘
//!                                                           │ late subscriber
//!                                                           ▼
//!                                               Schedule::defer(replay)
//!                                         (TokioScheduler | DeferredQueue)
//! ```
//!
//! ### Lifecycle of a listener
//! ```text
//! on(event, cb, {times: n}) ──► id
//!   ├─► each invocation: left -= 1
//!   │     └─ left == 0 ─► removed from Registry (id stays bound as a ghost)
//!   ├─► off(id)         ─► removed from Registry (ghost)
//!   └─► clear(event)    ─► removed from Registry, binding dropped unless soft
//!
//! ghosts ──► clear(event, {ghosts: true}) ──► compacted out of the binding
//! ```
//!
//! ## Features
//! | Area              | Description                                                    | Key types / traits                      |
//! |-------------------|----------------------------------------------------------------|-----------------------------------------|
//! | **Emitter**       | Register, remove and dispatch listeners by event name.         | [`EventsEmitter`], [`Emit`]             |
//! | **Listeners**     | Callbacks, bound contexts, repeat limits, ids.                 | [`Callback`], [`Context`], [`ListenOptions`], [`ListenerId`] |
//! | **Bulk clear**    | Full, soft and ghost-compaction modes.                          | [`ClearOptions`]                        |
//! | **Memory**        | Remember the latest trigger arguments and replay them.          | [`Memory`], [`Schedule`]                |
//! | **Mixins**        | Attach the operation set to any host type.                      | [`Mixin`], [`Emit`]                     |
//! | **Errors**        | Typed listener and dispatch errors.                             | [`ListenerError`], [`TriggerError`]     |
//! | **Configuration** | Id scope and root context.                                      | [`EmitterConfig`], [`IdScope`]          |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use recall_emitter::{ClearOptions, DeferredQueue, Emit, EmitterConfig, EventsEmitter};
//!
//! let queue = Arc::new(DeferredQueue::new());
//! let emitter: EventsEmitter<String> = EventsEmitter::builder(EmitterConfig::default())
//!     .with_scheduler(queue.clone())
//!     .build();
//!
//! // Remember "config" so late subscribers still see the last value.
//! emitter.remember("config");
//! emitter.trigger("config", &["debug=true".to_string()]).unwrap();
//!
//! emitter.on("config", |_, args| {
//!     println!("config: {}", args[0]);
//!     Ok(())
//! });
//! queue.run_pending(); // prints "config: debug=true"
//!
//! emitter.once("shutdown", |_, _| Ok(()));
//! emitter.trigger("shutdown", &[]).unwrap();
//! emitter.clear_all(ClearOptions::ghosts()); // drops the spent "shutdown" binding
//! assert_eq!(emitter.events(), vec!["config".to_string()]);
//! ```
mod core;
mod error;
mod listeners;
mod mixin;
mod scheduler;

// ---- Public re-exports ----

pub use crate::core::{EmitterBuilder, EmitterConfig, EventsEmitter, Memory};
pub use error::{ListenerError, TriggerError};
pub use listeners::{
    root_context, Callback, ClearOptions, Context, EventNames, IdScope, ListenOptions, ListenerId,
    Root,
};
pub use mixin::{Emit, Mixin};
pub use scheduler::{Deferred, DeferredQueue, Schedule, TokioScheduler};
