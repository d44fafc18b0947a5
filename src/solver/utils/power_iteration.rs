//! Dominant eigenvalue estimates for symmetric linear operators.

use crate::algebra::*;
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Settings for [`power_iteration`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerIterationSettings {
    pub tol: f64,
    pub max_iter: u32,
    pub seed: u64,
}

impl Default for PowerIterationSettings {
    fn default() -> Self {
        Self {
            tol: 1e-12,
            max_iter: 1000,
            seed: 0,
        }
    }
}

/// Estimates the largest magnitude eigenvalue of a symmetric operator
/// of dimension `n`, supplied as `apply(y, x)` computing `y = Mx`.
///
/// Iteration stops once the relative change in the eigenvalue estimate,
/// |λ - λ_prev| / |λ|, falls below `settings.tol`.  Returns zero for
/// `n = 0` or if the operator annihilates the iterate.
pub fn power_iteration<T, F>(n: usize, mut apply: F, settings: &PowerIterationSettings) -> T
where
    T: FloatT,
    F: FnMut(&mut [T], &[T]),
{
    if n == 0 {
        return T::zero();
    }

    let mut rng = Xoshiro256StarStar::seed_from_u64(settings.seed);
    let dist = Uniform::new_inclusive(-1.0f64, 1.0f64);
    let mut x: Vec<T> = (0..n).map(|_| dist.sample(&mut rng).as_T()).collect();
    let mut y = vec![T::zero(); n];

    let norm = x.norm();
    if norm == T::zero() {
        return T::zero();
    }
    x.scale(norm.recip());

    let tol: T = settings.tol.as_T();
    let mut lambda = T::zero();

    for k in 0..settings.max_iter {
        apply(&mut y, &x);
        let lambda_prev = lambda;
        lambda = x.dot(&y);

        let norm = y.norm();
        if norm == T::zero() || !norm.is_finite() {
            break;
        }
        y.scale(norm.recip());
        std::mem::swap(&mut x, &mut y);

        if k > 0 && T::abs(lambda - lambda_prev) < tol * T::abs(lambda) {
            break;
        }
    }
    lambda
}

#[test]
fn test_power_iteration_diagonal() {
    let d = [1.0, -2.0, 5.0, 3.0];
    let apply = |y: &mut [f64], x: &[f64]| {
        for i in 0..4 {
            y[i] = d[i] * x[i];
        }
    };
    let lambda: f64 = power_iteration(4, apply, &PowerIterationSettings::default());
    assert!((lambda - 5.0).abs() < 1e-8);
}

#[test]
fn test_power_iteration_negative_dominant() {
    // the iterate flips sign every step, the estimate does not
    let d = [-6.0, 1.0, 2.0];
    let mut calls = 0;
    let apply = |y: &mut [f64], x: &[f64]| {
        calls += 1;
        for i in 0..3 {
            y[i] = d[i] * x[i];
        }
    };
    let lambda: f64 = power_iteration(3, apply, &PowerIterationSettings::default());
    assert!((lambda + 6.0).abs() < 1e-8);
    assert!(calls < 100);
}

#[test]
fn test_power_iteration_zero_operator() {
    let lambda: f64 = power_iteration(
        3,
        |y: &mut [f64], _x: &[f64]| y.fill(0.0),
        &PowerIterationSettings::default(),
    );
    assert_eq!(lambda, 0.0);
}
