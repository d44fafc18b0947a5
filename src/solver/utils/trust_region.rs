//! Projection onto a box-bounded ray inside a Euclidean ball.
//!
//! For a direction `g`, lower bounds `l` and an anchor `z ≥ l`, the path
//!
//! ẑ(λ) = max(l, z - λg),  λ ≥ 0
//!
//! moves away from `z` monotonically in λ.  [`project`] finds the point on
//! this path at distance `r` from `z`, or returns `l` itself if `l` already
//! lies within the ball.  Each coordinate `i` with `gᵢ > 0` reaches its bound
//! at the breakpoint λᵢ = (zᵢ - lᵢ)/gᵢ, after which it stays clamped.  The
//! search runs over the sorted breakpoints, using prefix sums so that each
//! probe of ‖ẑ(λ) - z‖² costs O(1).

use super::{permute, PositionAll};
use crate::algebra::*;
use itertools::izip;
use std::cmp::Ordering;
use thiserror::Error;

/// Error type returned by [`project`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrustRegionError {
    #[error("Incompatible dimensions: g has length {g}, l has length {l}, z has length {z}")]
    DimensionMismatch { g: usize, l: usize, z: usize },
    #[error("Radius must be positive and finite")]
    NonPositiveRadius,
    #[error("Anchor violates its lower bound at index {0}")]
    InfeasibleAnchor(usize),
    #[error("No free coordinates remain at the target radius")]
    Degenerate,
}

/// Result of a trust region projection.
#[derive(Debug, Clone, PartialEq)]
pub struct TrustRegionSolution<T> {
    /// path parameter λ of the returned point
    pub lambda: T,
    /// the projected point ẑ(λ)
    pub z_hat: Vec<T>,
}

/// Finds ẑ(λ) = max(l, z - λg) with ‖ẑ(λ) - z‖ = r.
///
/// Entries of `l` may be `-∞`.  If ‖l - z‖ ≤ r the bound `l` is returned
/// with λ = 0.
pub fn project<T: FloatT>(
    g: &[T],
    l: &[T],
    z: &[T],
    r: T,
) -> Result<TrustRegionSolution<T>, TrustRegionError> {
    if g.len() != z.len() || l.len() != z.len() {
        return Err(TrustRegionError::DimensionMismatch {
            g: g.len(),
            l: l.len(),
            z: z.len(),
        });
    }
    if !(r.is_finite() && r > T::zero()) {
        return Err(TrustRegionError::NonPositiveRadius);
    }
    if let Some(i) = izip!(l, z).position(|(&l, &z)| z < l || z.is_nan()) {
        return Err(TrustRegionError::InfeasibleAnchor(i));
    }

    if l.dist(z) <= r {
        return Ok(TrustRegionSolution {
            lambda: T::zero(),
            z_hat: l.to_vec(),
        });
    }

    // squared distance to the bound and breakpoint per coordinate
    let dsq: Vec<T> = izip!(l, z).map(|(&l, &z)| T::powi(l - z, 2)).collect();
    let brk: Vec<T> = izip!(g, l, z).map(|(&g, &l, &z)| (z - l) / g).collect();

    // coordinates that never bind move freely for every λ, and
    // those sitting at their bound with g > 0 are clamped from λ = 0
    let mut f_low = T::zero();
    let mut f_high = T::zero();
    for (&g, &b, &d) in izip!(g, &brk, &dsq) {
        if g <= T::zero() || !b.is_finite() {
            f_high += g * g;
        } else if b <= T::zero() {
            f_low += d;
        }
    }

    // remaining breakpoints, sorted ascending
    let mut idx =
        izip!(g, &brk).position_all(|&(&g, &b)| g > T::zero() && b.is_finite() && b > T::zero());
    idx.sort_by(|&i, &j| brk[i].partial_cmp(&brk[j]).unwrap_or(Ordering::Equal));

    let k = idx.len();
    let mut bs = vec![T::zero(); k];
    let mut ds = vec![T::zero(); k];
    let mut gsq = vec![T::zero(); k];
    permute(&mut bs, &brk, &idx);
    permute(&mut ds, &dsq, &idx);
    permute(&mut gsq, &g.iter().map(|&g| g * g).collect::<Vec<T>>(), &idx);

    let csum_d = prefix_sums(&ds);
    let csum_g = prefix_sums(&gsq);

    // Invariant: sorted breakpoints in [0,low) are clamped at the
    // solution, those in [high,k) are free.  f_low and f_high carry
    // the resolved contributions of each group.
    let r2 = r * r;
    let (mut low, mut high) = (0, k);
    while low < high {
        let mid = (low + high + 1) / 2 - 1;
        let bmid = bs[mid];
        let f_mid = f_low
            + (csum_d[mid + 1] - csum_d[low])
            + bmid * bmid * (f_high + (csum_g[high] - csum_g[mid + 1]));

        if f_mid <= r2 {
            f_low += csum_d[mid + 1] - csum_d[low];
            low = mid + 1;
        } else {
            f_high += csum_g[high] - csum_g[mid];
            high = mid;
        }
    }

    if f_high <= T::zero() || r2 < f_low {
        return Err(TrustRegionError::Degenerate);
    }
    let lambda = T::sqrt((r2 - f_low) / f_high);

    let z_hat = izip!(g, l, z)
        .map(|(&g, &l, &z)| T::max(l, z - lambda * g))
        .collect();

    Ok(TrustRegionSolution { lambda, z_hat })
}

// csum[i] = sum of v[..i]
fn prefix_sums<T: FloatT>(v: &[T]) -> Vec<T> {
    let mut csum = Vec::with_capacity(v.len() + 1);
    csum.push(T::zero());
    for &x in v {
        let last = csum[csum.len() - 1];
        csum.push(last + x);
    }
    csum
}
