use super::{Iterates, ProblemData};
use crate::algebra::*;

/// Workspace and update rule for one PDHG step
///
/// x⁺ = max(0, x - (η/ω)(c - Aᵗy))
/// y⁺ = y - ηω(-b + A(2x⁺ - x))
///
/// The new point is assembled in the workspace before the iterates are touched.

#[derive(Debug, Clone)]
pub struct PdhgStep<T = f64> {
    x_new: Vec<T>,
    y_new: Vec<T>,
    // holds Aᵗy, then 2x⁺ - x
    work_x: Vec<T>,
}

impl<T> PdhgStep<T>
where
    T: FloatT,
{
    pub fn new(nx: usize, ny: usize) -> Self {
        Self {
            x_new: vec![T::zero(); nx],
            y_new: vec![T::zero(); ny],
            work_x: vec![T::zero(); nx],
        }
    }

    /// Take one step from `iterates.z`, writing the result into `z`
    /// and `z_hat` and folding it into the running average.
    pub fn step(&mut self, iterates: &mut Iterates<T>, data: &ProblemData<T>, eta: T, w: T) {
        assert!(!iterates.layout.is_split());
        assert_eq!(iterates.z.len(), data.nx + data.ny);

        let (x, y) = (iterates.x(), iterates.y());

        // x⁺ = max(0, x - (η/ω)(c - Aᵗy))
        self.work_x.copy_from(&data.c);
        data.A.t().gemv(&mut self.work_x, y, -T::one(), T::one());
        self.x_new
            .waxpby(T::one(), x, -eta / w, &self.work_x)
            .clamp_min(T::zero());

        // y⁺ = y - ηω(A(2x⁺ - x) - b)
        self.work_x.waxpby((2.).as_T(), &self.x_new, -T::one(), x);
        self.y_new.copy_from(&data.b);
        data.A.gemv(&mut self.y_new, &self.work_x, T::one(), -T::one());
        self.y_new.axpby(T::one(), y, -eta * w);

        let nx = data.nx;
        iterates.z[..nx].copy_from(&self.x_new);
        iterates.z[nx..].copy_from(&self.y_new);
        iterates.z_hat.copy_from(&iterates.z);
        iterates.update();
    }
}
