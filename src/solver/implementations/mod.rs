//! Solver implementations.   Only the standard LP form is provided.

pub mod default;
