// ---------------------------------
// Solver status type
// ---------------------------------

/// Status of solver at termination

#[repr(u32)]
#[derive(PartialEq, Eq, Clone, Debug, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverStatus {
    /// Problem is not solved (solver hasn't run).
    #[default]
    Unsolved,
    /// Termination criterion met (small duality gap, or small KKT
    /// residual when the gap is unavailable).
    Solved,
    /// Iteration limit reached before the termination criterion was met.
    MaxIterations,
}

impl SolverStatus {
    /// true if the solver stopped for a normal reason
    pub fn is_finished(&self) -> bool {
        matches!(*self, SolverStatus::Solved | SolverStatus::MaxIterations)
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
