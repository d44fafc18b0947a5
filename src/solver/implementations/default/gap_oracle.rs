#![allow(non_snake_case)]
use super::*;
use crate::algebra::*;
use crate::solver::core::traits::{DualityGapOracle, GapError};
use crate::solver::utils::trust_region::{project, TrustRegionError};

/// A [`DualityGapOracle`] that solves the gap subproblem directly.
///
/// The gap functional at a center `z0 = (x0, y0)` is linear in `(x, y)`
///
/// (b - A x0)ᵗy + (Aᵗy0 - c)ᵗx + cᵗx0 - bᵗy0
///
/// so its maximum over the ball ‖z - z0‖ ≤ r intersected with x ≥ 0 lies on
/// the path max(l, z0 + λ·coeff) with l = (0, -∞), found by
/// [`trust_region::project`](crate::solver::utils::trust_region::project).
///
/// Only primal-dual iterates are supported.
#[derive(Debug, Clone, Default)]
pub struct TrustRegionGapOracle<T = f64> {
    g: Vec<T>,
    l: Vec<T>,
    Ax0: Vec<T>,
}

impl<T> TrustRegionGapOracle<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self {
            g: Vec::new(),
            l: Vec::new(),
            Ax0: Vec::new(),
        }
    }

    fn resize(&mut self, nx: usize, ny: usize) {
        if self.g.len() != nx + ny {
            self.g = vec![T::zero(); nx + ny];
            self.l = vec![T::zero(); nx + ny];
            self.l[nx..].fill(T::neg_infinity());
            self.Ax0 = vec![T::zero(); ny];
        }
    }
}

impl<T> DualityGapOracle<T> for TrustRegionGapOracle<T>
where
    T: FloatT,
{
    fn normalized_duality_gap(
        &mut self,
        z0: &[T],
        r: T,
        data: &ProblemData<T>,
    ) -> Result<T, GapError> {
        let (nx, ny) = (data.nx, data.ny);
        if z0.len() != nx + ny {
            return Err(GapError::IllPosed(format!(
                "center has length {} but the problem has {} variables",
                z0.len(),
                nx + ny
            )));
        }
        self.resize(nx, ny);
        let (x0, y0) = z0.split_at(nx);

        // g = -coeff, with coeff = (Aᵗy0 - c, b - Ax0)
        let (gx, gy) = self.g.split_at_mut(nx);
        gx.copy_from(&data.c);
        data.A.t().gemv(gx, y0, -T::one(), T::one());
        self.Ax0.copy_from(&data.b);
        data.A.gemv(&mut self.Ax0, x0, T::one(), -T::one());
        gy.copy_from(&self.Ax0);

        let constant = data.c.dot(x0) - data.b.dot(y0);

        if self.g.norm_inf() == T::zero() {
            return Ok(constant / r);
        }

        let z_hat = match project(&self.g, &self.l, z0, r) {
            Ok(sol) => sol.z_hat,
            // nothing moves freely, so every improving coordinate sits at its bound
            Err(TrustRegionError::Degenerate) => self
                .g
                .iter()
                .zip(&self.l)
                .zip(z0)
                .map(|((&g, &l), &z)| if g > T::zero() { l } else { z })
                .collect(),
            Err(e) => return Err(GapError::IllPosed(e.to_string())),
        };

        // coeffᵗẑ = -gᵗẑ
        Ok((constant - self.g.dot(&z_hat)) / r)
    }
}
