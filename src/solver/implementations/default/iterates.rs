use super::ConvergenceInfo;
use crate::algebra::*;
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Layout of the combined iterate vector `z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterateLayout {
    /// z = (x, y)
    PrimalDual { nx: usize, ny: usize },
    /// z = (U, V, y) with U and V copies of the primal block
    Split { repeat_x: usize, nx: usize, ny: usize },
}

impl IterateLayout {
    pub fn len(&self) -> usize {
        match *self {
            IterateLayout::PrimalDual { nx, ny } => nx + ny,
            IterateLayout::Split { repeat_x, nx, ny } => repeat_x * nx + ny,
        }
    }

    /// offset of the dual block within z
    pub fn dual_offset(&self) -> usize {
        match *self {
            IterateLayout::PrimalDual { nx, .. } => nx,
            IterateLayout::Split { repeat_x, nx, .. } => repeat_x * nx,
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, IterateLayout::Split { .. })
    }
}

/// Values of `z` at the start of the current and previous restart epochs.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochCache<T> {
    pub current: Vec<T>,
    /// `None` until the first restart
    pub previous: Option<Vec<T>>,
}

/// Primal-dual iterates with their running average and counters.

#[derive(Debug, Clone, PartialEq)]
pub struct Iterates<T = f64> {
    /// current iterate
    pub z: Vec<T>,
    /// latest proposal before averaging
    pub z_hat: Vec<T>,
    /// average of the proposals since the last restart
    pub z_bar: Vec<T>,
    /// steps since the last restart
    pub t: u32,
    /// number of restarts
    pub n: u32,
    /// total steps taken, starting from 1
    pub count: u32,
    pub terminate: bool,
    pub info: ConvergenceInfo<T>,
    pub cache: EpochCache<T>,
    pub layout: IterateLayout,
}

impl<T> Iterates<T>
where
    T: FloatT,
{
    /// zero initialized iterates for z = (x, y)
    pub fn new(nx: usize, ny: usize) -> Self {
        let layout = IterateLayout::PrimalDual { nx, ny };
        let z = vec![T::zero(); layout.len()];
        Self::from_initial(z, layout)
    }

    /// randomly initialized iterates for z = (U, V, y), uniform on [-1,1]
    pub fn new_split(repeat_x: usize, nx: usize, ny: usize, seed: u64) -> Self {
        let layout = IterateLayout::Split { repeat_x, nx, ny };
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let dist = Uniform::new_inclusive(-1.0f64, 1.0f64);
        let z = (0..layout.len())
            .map(|_| dist.sample(&mut rng).as_T())
            .collect();
        Self::from_initial(z, layout)
    }

    fn from_initial(z: Vec<T>, layout: IterateLayout) -> Self {
        Self {
            z_hat: z.clone(),
            z_bar: z.clone(),
            cache: EpochCache {
                current: z.clone(),
                previous: None,
            },
            z,
            t: 0,
            n: 0,
            count: 1,
            terminate: false,
            info: ConvergenceInfo::default(),
            layout,
        }
    }

    /// Fold `z_hat` into the running average and advance the counters.
    pub fn update(&mut self) {
        let t: T = self.t.as_T();
        let a = T::recip(t + T::one());
        self.z_bar.axpby(a, &self.z_hat, t * a);
        self.t += 1;
        self.count += 1;
    }

    /// Restart from the running average and rotate the epoch cache.
    pub fn restart(&mut self) {
        self.n += 1;
        self.t = 0;
        self.count += 1;
        self.z.copy_from(&self.z_bar);
        let previous = std::mem::replace(&mut self.cache.current, self.z.clone());
        self.cache.previous = Some(previous);
    }

    /// step index of the most recent step, as used for cadence checks
    pub fn step(&self) -> u32 {
        self.count - 1
    }

    pub fn x(&self) -> &[T] {
        &self.z[..self.layout.dual_offset()]
    }

    pub fn y(&self) -> &[T] {
        &self.z[self.layout.dual_offset()..]
    }

    /// first primal copy in split mode
    pub fn x_u(&self) -> &[T] {
        let nx = self.primal_block_len();
        &self.z[..nx]
    }

    /// second primal copy in split mode
    pub fn x_v(&self) -> &[T] {
        let nx = self.primal_block_len();
        &self.z[nx..2 * nx]
    }

    fn primal_block_len(&self) -> usize {
        match self.layout {
            IterateLayout::Split { repeat_x, nx, .. } => {
                assert!(repeat_x >= 2, "split iterates need two primal copies");
                nx
            }
            IterateLayout::PrimalDual { .. } => panic!("iterates are not in split mode"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_is_running_mean() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        let dist = Uniform::new(-10.0, 10.0);

        for k in [1, 5, 50] {
            let mut iterates = Iterates::<f64>::new(3, 2);
            let mut sum = vec![0.0; 5];
            for _ in 0..k {
                let proposal: Vec<f64> = (0..5).map(|_| dist.sample(&mut rng)).collect();
                iterates.z_hat.copy_from(&proposal);
                sum.axpby(1.0, &proposal, 1.0);
                iterates.update();
            }
            sum.scale(1.0 / k as f64);
            assert!(iterates.z_bar.dist(&sum) <= 1e-12);
            assert_eq!(iterates.t, k);
            assert_eq!(iterates.count, k + 1);
        }
    }

    #[test]
    fn test_restart_rotates_cache() {
        let mut iterates = Iterates::<f64>::new(2, 1);
        assert!(iterates.cache.previous.is_none());

        iterates.z_hat.copy_from(&[1., 2., 3.]);
        iterates.update();
        iterates.restart();

        assert_eq!(iterates.t, 0);
        assert_eq!(iterates.n, 1);
        assert_eq!(iterates.count, 3);
        assert_eq!(iterates.z, vec![1., 2., 3.]);
        assert_eq!(iterates.cache.current, vec![1., 2., 3.]);
        assert_eq!(iterates.cache.previous, Some(vec![0., 0., 0.]));

        iterates.restart();
        assert_eq!(iterates.n, 2);
        assert_eq!(iterates.cache.previous, Some(vec![1., 2., 3.]));
    }

    #[test]
    fn test_split_accessors() {
        let a = Iterates::<f64>::new_split(2, 3, 2, 42);
        let b = Iterates::<f64>::new_split(2, 3, 2, 42);

        assert_eq!(a.z.len(), 8);
        assert_eq!(a.z, b.z);
        assert!(a.z.iter().all(|v| v.abs() <= 1.0));
        assert_eq!(a.x_u(), &a.z[0..3]);
        assert_eq!(a.x_v(), &a.z[3..6]);
        assert_eq!(a.y(), &a.z[6..8]);
        assert_eq!(a.cache.current, a.z);
    }
}
