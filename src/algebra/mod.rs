//! Linear algebra types and operations used throughout the solver.
//!
//! Vector operations are provided through the [`VectorMath`] trait,
//! implemented on slices of [`FloatT`].  The constraint matrix is held
//! as a [`CscMatrix`] and multiplied through [`MatrixVectorMultiply`],
//! either directly or via its [`Adjoint`].

mod adjoint;
mod csc;
mod error_types;
mod floats;
mod math_traits;
mod matrix_traits;
mod matrix_types;
mod vecmath;

pub use csc::*;
pub use error_types::*;
pub use floats::*;
pub use math_traits::*;
pub use matrix_traits::*;
pub use matrix_types::*;

#[cfg(test)]
mod tests;
