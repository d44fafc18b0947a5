#![allow(non_snake_case)]
//! Parameter selection helpers.
//!
//! Step sizes and primal weights for PDHG are problem dependent.  These
//! helpers estimate ‖A‖₂ and run short parameter sweeps, keeping the
//! value that reaches the smallest KKT error within the iteration budget
//! of the supplied settings.

use super::*;
use crate::algebra::*;
use crate::solver::utils::power_iteration::{power_iteration, PowerIterationSettings};

/// Outcome of a parameter sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult<P, T> {
    /// parameter with the smallest final KKT error
    pub best: P,
    pub kkt_error: T,
    /// every (parameter, final KKT error) pair, in sweep order
    pub trials: Vec<(P, T)>,
}

/// Estimate of the spectral norm ‖A‖₂, via power iteration on AᵗA.
pub fn estimate_operator_norm<T: FloatT>(A: &CscMatrix<T>) -> T {
    let (m, n) = A.size();
    let mut Ax = vec![T::zero(); m];
    let apply = |y: &mut [T], x: &[T]| {
        A.gemv(&mut Ax, x, T::one(), T::zero());
        A.t().gemv(y, &Ax, T::one(), T::zero());
    };
    let lambda: T = power_iteration(n, apply, &PowerIterationSettings::default());
    T::sqrt(T::max(lambda, T::zero()))
}

/// A step size η with η‖A‖₂ < 1, for use with unit primal weight.
pub fn suggest_step_size<T: FloatT>(A: &CscMatrix<T>) -> T {
    let norm = estimate_operator_norm(A);
    if norm > T::zero() {
        let s: T = (0.9).as_T();
        s / norm
    } else {
        T::one()
    }
}

/// The monotone saddle operator F(z) = (c - Aᵗy, Ax - b) at z = (x, y).
pub fn saddle_operator<T: FloatT>(data: &ProblemData<T>, z: &[T], out: &mut [T]) {
    assert_eq!(z.len(), data.nx + data.ny);
    assert_eq!(out.len(), data.nx + data.ny);

    let (x, y) = z.split_at(data.nx);
    let (Fx, Fy) = out.split_at_mut(data.nx);

    Fx.copy_from(&data.c);
    data.A.t().gemv(Fx, y, -T::one(), T::one());
    Fy.copy_from(&data.b);
    data.A.gemv(Fy, x, T::one(), -T::one());
}

/// Sweep the primal weight ω over 4⁻⁵ … 4⁵ with restarts disabled.
pub fn optimal_primal_weight<T: FloatT>(
    data: &ProblemData<T>,
    settings: &DefaultSettings<T>,
) -> Result<SweepResult<T, T>, SolverError> {
    let four: T = (4.0).as_T();
    let candidates = (-5..=5).map(|k| four.powi(k));

    sweep(data, candidates, |w| {
        let mut settings = settings.clone();
        settings.w = w;
        settings.restart_enable = false;
        settings.verbose = false;
        settings
    })
}

/// Sweep the fixed restart length over 4¹ … 4⁹.
pub fn best_fixed_restart_length<T: FloatT>(
    data: &ProblemData<T>,
    settings: &DefaultSettings<T>,
) -> Result<SweepResult<u32, T>, SolverError> {
    let candidates = (1..=9).map(|k| 4u32.pow(k));

    sweep(data, candidates, |length| {
        let mut settings = settings.clone();
        settings.restart_enable = true;
        settings.restart_method = "fixed".to_string();
        settings.restart_length = length;
        settings.verbose = false;
        settings
    })
}

fn sweep<T, P>(
    data: &ProblemData<T>,
    candidates: impl Iterator<Item = P>,
    mut configure: impl FnMut(P) -> DefaultSettings<T>,
) -> Result<SweepResult<P, T>, SolverError>
where
    T: FloatT,
    P: Copy,
{
    let mut trials = Vec::new();
    for p in candidates {
        let mut solver = DefaultSolver::new_from_data(data.clone(), configure(p))?;
        solver.solve();
        trials.push((p, solver.solution.info.kkt_error));
    }

    // NaN errors from diverged runs never win
    let (best, kkt_error) = trials
        .iter()
        .copied()
        .filter(|(_, kkt)| !kkt.is_nan())
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .or_else(|| trials.first().copied())
        .ok_or(SolverError::Settings(
            crate::solver::core::SettingsError::BadFieldValue("sweep candidates"),
        ))?;

    Ok(SweepResult {
        best,
        kkt_error,
        trials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_norm() {
        // diag(3, 4) has norm 4
        let A = CscMatrix::new_from_triplets(2, 2, &[0, 1], &[0, 1], &[3.0, -4.0]);
        assert!((estimate_operator_norm::<f64>(&A) - 4.0).abs() < 1e-8);

        // example constraint matrix has ‖A‖₂² = largest eigenvalue of [[2,1],[1,2]] = 3
        let data = ProblemData::<f64>::example_lp();
        assert!((estimate_operator_norm(&data.A) - 3f64.sqrt()).abs() < 1e-8);
        assert!(suggest_step_size(&data.A) * 3f64.sqrt() < 1.0);
    }

    #[test]
    fn test_saddle_operator_vanishes_at_solution() {
        let data = ProblemData::<f64>::example_lp();
        let z = [4., 1., 0., 0., 0., -1., -3.];
        let mut F = vec![0.0; 7];
        saddle_operator(&data, &z, &mut F);
        // only x₃ = 0 carries a nonzero reduced cost
        assert_eq!(F, vec![0., 0., 1., 0., 0., 0., 0.]);
    }

    #[test]
    fn test_sweeps() {
        let data = ProblemData::<f64>::example_lp();
        let mut settings = DefaultSettings::<f64>::default();
        settings.max_iter = 200;

        let result = optimal_primal_weight(&data, &settings).unwrap();
        assert_eq!(result.trials.len(), 11);
        assert!(result.trials.iter().all(|(_, kkt)| *kkt >= result.kkt_error));

        let result = best_fixed_restart_length(&data, &settings).unwrap();
        assert_eq!(result.trials.len(), 9);
        assert_eq!(result.trials[0].0, 4);
        assert_eq!(result.trials[8].0, 262144);
    }
}
