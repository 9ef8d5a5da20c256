//! Named signal sources and subscription bookkeeping.
//!
//! Components announce state changes through an [`Emitter`], keyed by a
//! signal name such as `"size-changed"`. Consumers connect [`Handler`]s and
//! keep the resulting bindings in a [`SignalTracker`] so teardown can release
//! every subscription in one call.

mod emitter;
mod tracker;

#[cfg(test)]
mod tests;

pub use emitter::{Emitter, Handler, HandlerId, SignalSource};
pub use tracker::{SignalError, SignalTracker};
