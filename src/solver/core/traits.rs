//! Core traits for the external collaborators of the solver.
//!
//! The solver itself never solves the quadratically constrained
//! duality gap subproblem.   It is instead supplied by an object
//! implementing [`DualityGapOracle`], e.g. a wrapper around a
//! commercial QCP solver, or the built in
//! [`TrustRegionGapOracle`](crate::solver::implementations::default::TrustRegionGapOracle).

use crate::algebra::FloatT;
use crate::solver::implementations::default::ProblemData;
use thiserror::Error;

/// Error type returned by a [`DualityGapOracle`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GapError {
    /// The external subproblem solver failed or returned no optimum.
    #[error("Duality gap subproblem failed: {0}")]
    SubproblemFailed(String),
    /// The subproblem could not be posed for the given center and radius.
    #[error("Duality gap subproblem is ill-posed: {0}")]
    IllPosed(String),
    /// No oracle has been attached to the solver.
    #[error("No duality gap oracle is configured")]
    Unavailable,
}

/// Evaluates the normalized duality gap of a linear program
/// over a ball around a primal-dual point.
///
/// Given a center `z0 = (x0, y0)` and a radius `r > 0`, an
/// implementation should return
///
/// max { (b - A x0)ᵗy + (Aᵗy0 - c)ᵗx + cᵗx0 - bᵗy0 : ‖(x,y) - z0‖ ≤ r, x ≥ 0 } / r
///
/// The solver treats any error as "no information" for that evaluation.
pub trait DualityGapOracle<T: FloatT> {
    fn normalized_duality_gap(
        &mut self,
        z0: &[T],
        r: T,
        data: &ProblemData<T>,
    ) -> Result<T, GapError>;
}

impl<T, F> DualityGapOracle<T> for F
where
    T: FloatT,
    F: FnMut(&[T], T, &ProblemData<T>) -> Result<T, GapError>,
{
    fn normalized_duality_gap(
        &mut self,
        z0: &[T],
        r: T,
        data: &ProblemData<T>,
    ) -> Result<T, GapError> {
        self(z0, r, data)
    }
}
