#![allow(non_snake_case)]
use super::*;
use crate::algebra::*;
use crate::solver::core::traits::{DualityGapOracle, GapError};

// ---------------
// normalized duality gap evaluation
// ---------------

/// Owns the optional duality gap oracle and tracks its failures.
///
/// After `failure_limit` consecutive failures the gap is disabled
/// for the remainder of the solve.
pub struct GapEvaluator<T: FloatT> {
    oracle: Option<Box<dyn DualityGapOracle<T>>>,
    consecutive_failures: u32,
    failure_limit: u32,
    disabled: bool,
    just_disabled: bool,
}

impl<T: FloatT> std::fmt::Debug for GapEvaluator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GapEvaluator")
            .field("has_oracle", &self.oracle.is_some())
            .field("consecutive_failures", &self.consecutive_failures)
            .field("failure_limit", &self.failure_limit)
            .field("disabled", &self.disabled)
            .finish()
    }
}

impl<T> GapEvaluator<T>
where
    T: FloatT,
{
    pub fn new(failure_limit: u32) -> Self {
        Self {
            oracle: None,
            consecutive_failures: 0,
            failure_limit,
            disabled: false,
            just_disabled: false,
        }
    }

    pub fn set_oracle(&mut self, oracle: Box<dyn DualityGapOracle<T>>) {
        self.oracle = Some(oracle);
        self.reset();
    }

    pub fn has_oracle(&self) -> bool {
        self.oracle.is_some()
    }

    /// true if an oracle is attached and has not been disabled
    pub fn is_available(&self) -> bool {
        self.oracle.is_some() && !self.disabled
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// re-enable the oracle and clear its failure count
    pub fn reset(&mut self) {
        self.consecutive_failures = 0;
        self.disabled = false;
        self.just_disabled = false;
    }

    /// Returns true exactly once, on the first call after the
    /// oracle has been disabled.
    pub fn take_disabled_notice(&mut self) -> bool {
        std::mem::take(&mut self.just_disabled)
    }

    /// Query the normalized duality gap at `z0` over a ball of radius `r`.
    pub fn evaluate(&mut self, z0: &[T], r: T, data: &ProblemData<T>) -> Result<T, GapError> {
        if self.disabled {
            return Err(GapError::Unavailable);
        }
        let oracle = self.oracle.as_mut().ok_or(GapError::Unavailable)?;

        match oracle.normalized_duality_gap(z0, r, data) {
            Ok(gap) if gap.is_finite() => {
                self.consecutive_failures = 0;
                Ok(gap)
            }
            Ok(gap) => {
                self.record_failure();
                Err(GapError::SubproblemFailed(format!("non-finite gap {}", gap)))
            }
            Err(e) => {
                self.record_failure();
                Err(e)
            }
        }
    }

    fn record_failure(&mut self) {
        self.consecutive_failures += 1;
        if self.consecutive_failures >= self.failure_limit {
            self.disabled = true;
            self.just_disabled = true;
        }
    }
}

// ---------------
// KKT residual and termination
// ---------------

/// Computes convergence diagnostics and applies the termination rule.
#[derive(Debug, Clone)]
pub struct ConvergenceEvaluator<T = f64> {
    Ax: Vec<T>,
    Aty: Vec<T>,
}

// gap radius shift, keeps r > 0 at the start of an epoch
const RADIUS_SHIFT: f64 = 1e-6;

impl<T> ConvergenceEvaluator<T>
where
    T: FloatT,
{
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            Ax: vec![T::zero(); ny],
            Aty: vec![T::zero(); nx],
        }
    }

    /// Evaluate the iterates and store the result on them.
    ///
    /// The normalized duality gap is computed only when `settings.gap_enable`
    /// is set and the oracle is available.  If the gap is present the run
    /// terminates once |gap| < `tol`.  A missing gap never terminates the
    /// run, except after the oracle has been disabled by repeated failures,
    /// when the KKT error is compared against `tol_kkt` instead.
    pub fn evaluate(
        &mut self,
        iterates: &mut Iterates<T>,
        data: &ProblemData<T>,
        settings: &DefaultSettings<T>,
        gap: &mut GapEvaluator<T>,
    ) -> ConvergenceInfo<T> {
        let kkt_error = self.kkt_error(iterates, data);

        let normalized_duality_gap = if settings.gap_enable {
            let r = iterates.z.dist(&iterates.cache.current) + RADIUS_SHIFT.as_T();
            gap.evaluate(&iterates.z_bar, r, data).ok()
        } else {
            None
        };

        let info = ConvergenceInfo::new(kkt_error, normalized_duality_gap);

        let converged = match normalized_duality_gap {
            Some(g) => g.abs() < settings.tol,
            None => gap.is_disabled() && kkt_error < settings.tol_kkt,
        };
        if converged {
            iterates.terminate = true;
        }
        iterates.info = info;
        info
    }

    /// Norm of the positive part of the KKT residual vector.
    pub fn kkt_error(&mut self, iterates: &Iterates<T>, data: &ProblemData<T>) -> T {
        match iterates.layout {
            IterateLayout::PrimalDual { .. } => self.kkt_error_primal_dual(iterates, data),
            IterateLayout::Split { .. } => self.kkt_error_split(iterates, data),
        }
    }

    // residual {-x, Ax-b, b-Ax, Aᵗy-c, cᵗx-bᵗy}
    fn kkt_error_primal_dual(&mut self, iterates: &Iterates<T>, data: &ProblemData<T>) -> T {
        let (x, y) = (iterates.x(), iterates.y());

        self.Ax.copy_from(&data.b);
        data.A.gemv(&mut self.Ax, x, T::one(), -T::one());
        self.Aty.copy_from(&data.c);
        data.A.t().gemv(&mut self.Aty, y, T::one(), -T::one());
        let gap = data.c.dot(x) - data.b.dot(y);

        let mut sumsq = sumsq_positive(x.iter().map(|&v| -v));
        sumsq += sumsq_positive(self.Ax.iter().copied());
        sumsq += sumsq_positive(self.Ax.iter().map(|&v| -v));
        sumsq += sumsq_positive(self.Aty.iter().copied());
        sumsq += sumsq_positive(std::iter::once(gap));
        sumsq.sqrt()
    }

    // residual {-V, AU-b, b-AU, U-V, V-U}
    fn kkt_error_split(&mut self, iterates: &Iterates<T>, data: &ProblemData<T>) -> T {
        let (U, V) = (iterates.x_u(), iterates.x_v());

        self.Ax.copy_from(&data.b);
        data.A.gemv(&mut self.Ax, U, T::one(), -T::one());

        let mut sumsq = sumsq_positive(V.iter().map(|&v| -v));
        sumsq += sumsq_positive(self.Ax.iter().copied());
        sumsq += sumsq_positive(self.Ax.iter().map(|&v| -v));
        sumsq += sumsq_positive(U.iter().zip(V).map(|(&u, &v)| u - v));
        sumsq += sumsq_positive(U.iter().zip(V).map(|(&u, &v)| v - u));
        sumsq.sqrt()
    }
}

fn sumsq_positive<T: FloatT>(v: impl Iterator<Item = T>) -> T {
    v.map(|v| T::max(v, T::zero()))
        .fold(T::zero(), |acc, v| acc + v * v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_solution() -> (Iterates<f64>, ProblemData<f64>) {
        let data = ProblemData::<f64>::example_lp();
        let mut iterates = Iterates::new(data.nx, data.ny);
        iterates.z.copy_from(&[4., 1., 0., 0., 0., -1., -3.]);
        (iterates, data)
    }

    #[test]
    fn test_kkt_at_solution() {
        let (mut iterates, data) = at_solution();
        let settings = DefaultSettings::default();
        let mut gap = GapEvaluator::new(3);
        let mut evaluator = ConvergenceEvaluator::new(data.nx, data.ny);

        let info = evaluator.evaluate(&mut iterates, &data, &settings, &mut gap);
        assert!(info.kkt_error >= 0.0);
        assert!(info.kkt_error <= 1e-7);
        assert!(info.normalized_duality_gap.is_none());

        // a gap that is switched off never terminates the run
        assert!(!iterates.terminate);
        assert_eq!(iterates.info, info);
    }

    #[test]
    fn test_kkt_fallback_after_disable() {
        let (mut iterates, data) = at_solution();
        let mut settings = DefaultSettings::default();
        settings.gap_enable = true;
        let mut evaluator = ConvergenceEvaluator::new(data.nx, data.ny);

        let mut gap = GapEvaluator::new(2);
        gap.set_oracle(Box::new(
            |_z0: &[f64], _r: f64, _data: &ProblemData<f64>| -> Result<f64, GapError> {
                Err(GapError::IllPosed("unbounded".to_string()))
            },
        ));

        // a single failure is not enough to fall back
        evaluator.evaluate(&mut iterates, &data, &settings, &mut gap);
        assert!(!gap.is_disabled());
        assert!(!iterates.terminate);

        evaluator.evaluate(&mut iterates, &data, &settings, &mut gap);
        assert!(gap.is_disabled());
        assert!(iterates.terminate);
    }

    #[test]
    fn test_no_oracle_never_terminates() {
        let (mut iterates, data) = at_solution();
        let mut settings = DefaultSettings::default();
        settings.gap_enable = true;
        let mut gap = GapEvaluator::new(3);
        let mut evaluator = ConvergenceEvaluator::new(data.nx, data.ny);

        for _ in 0..5 {
            evaluator.evaluate(&mut iterates, &data, &settings, &mut gap);
        }
        assert!(!gap.is_disabled());
        assert!(!iterates.terminate);
    }

    #[test]
    fn test_kkt_at_origin() {
        // only the dual residual Aᵗy - c = (4,3,0,0,0) and the -b part are positive
        let data = ProblemData::<f64>::example_lp();
        let mut iterates = Iterates::new(data.nx, data.ny);
        let settings = DefaultSettings::default();
        let mut gap = GapEvaluator::new(3);
        let mut evaluator = ConvergenceEvaluator::new(data.nx, data.ny);

        let info = evaluator.evaluate(&mut iterates, &data, &settings, &mut gap);
        let expected = (16f64 + 25. + 16. + 9.).sqrt();
        assert!((info.kkt_error - expected).abs() < 1e-12);
        assert!(!iterates.terminate);
    }

    #[test]
    fn test_gap_termination() {
        let (mut iterates, data) = at_solution();
        // shift away from the solution so the KKT rule alone would not fire
        iterates.z[0] = 100.0;
        let mut settings = DefaultSettings::default();
        settings.gap_enable = true;
        let mut evaluator = ConvergenceEvaluator::new(data.nx, data.ny);

        let mut gap = GapEvaluator::new(3);
        gap.set_oracle(Box::new(
            |_z0: &[f64], r: f64, _data: &ProblemData<f64>| -> Result<f64, GapError> {
                assert!(r > 0.0);
                Ok(1e-9)
            },
        ));

        let info = evaluator.evaluate(&mut iterates, &data, &settings, &mut gap);
        assert_eq!(info.normalized_duality_gap, Some(1e-9));
        assert!(iterates.terminate);
    }

    #[test]
    fn test_gap_failures_disable_oracle() {
        let data = ProblemData::<f64>::example_lp();
        let mut gap = GapEvaluator::new(2);
        gap.set_oracle(Box::new(
            |_z0: &[f64], _r: f64, _data: &ProblemData<f64>| -> Result<f64, GapError> {
                Err(GapError::SubproblemFailed("no license".to_string()))
            },
        ));
        let z0 = vec![0.0; 7];

        assert!(gap.evaluate(&z0, 1.0, &data).is_err());
        assert!(gap.is_available());
        assert!(gap.evaluate(&z0, 1.0, &data).is_err());
        assert!(!gap.is_available());
        assert!(gap.take_disabled_notice());
        assert!(!gap.take_disabled_notice());
        assert_eq!(gap.evaluate(&z0, 1.0, &data), Err(GapError::Unavailable));
    }

    #[test]
    fn test_kkt_split() {
        let data = ProblemData::<f64>::example_lp();
        let mut iterates = Iterates::<f64>::new_split(2, data.nx, data.ny, 1);
        let x = [4., 1., 0., 0., 0.];
        iterates.z[..5].copy_from(&x);
        iterates.z[5..10].copy_from(&x);
        let mut evaluator = ConvergenceEvaluator::new(data.nx, data.ny);
        assert!(evaluator.kkt_error(&iterates, &data) < 1e-14);

        // V negative and U ≠ V are both penalized
        iterates.z[5] = -1.0;
        let expected = (1f64 + 25.).sqrt();
        assert!((evaluator.kkt_error(&iterates, &data) - expected).abs() < 1e-12);
    }
}
