use super::*;
use crate::{algebra::*, solver::core::SolverStatus};

/// Final result of a solve.
#[derive(Debug, Clone)]
pub struct DefaultSolution<T> {
    /// primal solution
    pub x: Vec<T>,
    /// dual solution
    pub y: Vec<T>,
    /// final solver status
    pub status: SolverStatus,
    /// primal objective value cᵗx
    pub obj_val: T,
    /// dual objective value bᵗy
    pub obj_val_dual: T,
    /// solve time in seconds
    pub solve_time: f64,
    /// number of iterations
    pub iterations: u32,
    /// number of restarts
    pub restarts: u32,
    /// convergence diagnostics at termination
    pub info: ConvergenceInfo<T>,
}

impl<T> DefaultSolution<T>
where
    T: FloatT,
{
    /// Create a new `DefaultSolution` object
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            x: vec![T::zero(); nx],
            y: vec![T::zero(); ny],
            status: SolverStatus::Unsolved,
            obj_val: T::nan(),
            obj_val_dual: T::nan(),
            solve_time: 0f64,
            iterations: 0,
            restarts: 0,
            info: ConvergenceInfo::default(),
        }
    }

    pub(crate) fn finalize(
        &mut self,
        data: &ProblemData<T>,
        iterates: &Iterates<T>,
        info: &DefaultInfo<T>,
    ) {
        self.status = info.status;
        self.x.copy_from(iterates.x());
        self.y.copy_from(iterates.y());
        self.obj_val = data.primal_objective(&self.x);
        self.obj_val_dual = data.dual_objective(&self.y);
        self.solve_time = info.solve_time;
        self.iterations = info.iterations;
        self.restarts = info.restarts;
        self.info = info.last;
    }
}
