//! # Attaching the operation set to host types.
//!
//! - [`Emit`] - the operation set, defined once as default methods
//! - [`Mixin`] - generic host + emitter pair implementing [`Emit`]

mod emit;
mod host;

pub use emit::Emit;
pub use host::Mixin;
