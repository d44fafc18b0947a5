use super::*;
use crate::algebra::*;
use crate::io::PrintTarget;
use crate::solver::core::SolverStatus;
use crate::timers::*;
use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Convergence diagnostics from a single evaluation of the iterates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct ConvergenceInfo<T> {
    /// norm of the clipped KKT residual vector
    pub kkt_error: T,
    /// normalized duality gap, `None` when it was not computed
    pub normalized_duality_gap: Option<T>,
}

impl<T> ConvergenceInfo<T>
where
    T: FloatT,
{
    pub fn new(kkt_error: T, normalized_duality_gap: Option<T>) -> Self {
        Self {
            kkt_error,
            normalized_duality_gap,
        }
    }

    /// the gap value, or NaN when it is absent
    pub fn gap_or_nan(&self) -> T {
        self.normalized_duality_gap.unwrap_or_else(T::nan)
    }
}

/// Run summary and diagnostics output for the solver.

#[derive(Default, Debug)]
pub struct DefaultInfo<T> {
    pub iterations: u32,
    pub restarts: u32,
    pub last: ConvergenceInfo<T>,
    pub solve_time: f64,
    pub status: SolverStatus,
    // time of the most recent progress line
    pub(crate) last_report: Option<Instant>,
    pub(crate) stream: PrintTarget,
}

impl<T> DefaultInfo<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self, timers: &mut Timers) {
        self.status = SolverStatus::Unsolved;
        self.iterations = 0;
        self.restarts = 0;
        self.solve_time = 0f64;
        self.last = ConvergenceInfo::default();
        self.last_report = Some(Instant::now());

        timers.reset_timer("solve");
    }

    pub fn finalize(&mut self, iterates: &Iterates<T>, timers: &Timers) {
        self.iterations = iterates.step();
        self.restarts = iterates.n;
        self.last = iterates.info;
        self.solve_time = timers.elapsed("solve").as_secs_f64();
    }

    /// seconds since the previous call, or since `reset`
    pub(crate) fn lap(&mut self) -> f64 {
        let now = Instant::now();
        let lap = self
            .last_report
            .map_or(0.0, |t| now.duration_since(t).as_secs_f64());
        self.last_report = Some(now);
        lap
    }
}
