//! Wall-clock timers for solver phases.

mod timers;
pub use timers::Timers;
pub(crate) use timers::{notimeit, timeit};
