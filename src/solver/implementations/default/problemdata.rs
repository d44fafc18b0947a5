#![allow(non_snake_case)]
use crate::algebra::*;
use thiserror::Error;

/// Error type returned when problem data are inconsistent.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProblemDataError {
    #[error("Incompatible dimensions: {0}")]
    IncompatibleDimension(String),
    #[error("Problem data contains non-finite values in {0}")]
    NonFinite(&'static str),
    #[error("Data formatting error")]
    BadFormat(#[from] SparseFormatError),
}

// ---------------
// Data type for the standard form LP
// ---------------

/// Data for the linear program
///
/// min cᵗx  s.t.  Ax = b,  x ≥ 0
///
/// with `A` of size `ny × nx`.   The data is fixed for the lifetime of a solve.

#[derive(Debug, Clone)]
pub struct ProblemData<T = f64> {
    pub A: CscMatrix<T>,
    pub b: Vec<T>,
    pub c: Vec<T>,
    pub nx: usize,
    pub ny: usize,
    /// optional label identifying the instance in saved output
    pub name: Option<String>,
}

impl<T> ProblemData<T>
where
    T: FloatT,
{
    pub fn new(A: &CscMatrix<T>, b: &[T], c: &[T]) -> Result<Self, ProblemDataError> {
        A.check_format()?;

        let (ny, nx) = A.size();
        if c.len() != nx {
            return Err(ProblemDataError::IncompatibleDimension(format!(
                "c has length {} but A has {} columns",
                c.len(),
                nx
            )));
        }
        if b.len() != ny {
            return Err(ProblemDataError::IncompatibleDimension(format!(
                "b has length {} but A has {} rows",
                b.len(),
                ny
            )));
        }
        if !b.is_finite() {
            return Err(ProblemDataError::NonFinite("b"));
        }
        if !c.is_finite() {
            return Err(ProblemDataError::NonFinite("c"));
        }
        if !A.nzval.is_finite() {
            return Err(ProblemDataError::NonFinite("A"));
        }

        Ok(Self {
            A: A.clone(),
            b: b.to_vec(),
            c: c.to_vec(),
            nx,
            ny,
            name: None,
        })
    }

    /// attach a label to the instance
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// dataset label, or "unnamed" if none was given
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }

    /// The small reference instance
    ///
    /// min -4x₁ - 3x₂  s.t.  x₁ + x₃ = 4,  x₁ + x₂ = 5,  x ≥ 0
    ///
    /// with primal solution x = (4,1,0,0,0) and dual solution y = (-1,-3).
    pub fn example_lp() -> Self {
        let A = CscMatrix::new_from_triplets(
            2,
            5,
            &[0, 0, 1, 1],
            &[0, 2, 0, 1],
            &[T::one(), T::one(), T::one(), T::one()],
        );
        let b = [(4.).as_T(), (5.).as_T()];
        let c = [
            (-4.).as_T(),
            (-3.).as_T(),
            T::zero(),
            T::zero(),
            T::zero(),
        ];
        // constant data is known to be consistent
        Self {
            A,
            b: b.to_vec(),
            c: c.to_vec(),
            nx: 5,
            ny: 2,
            name: Some("example_lp".to_string()),
        }
    }

    /// primal objective cᵗx
    pub fn primal_objective(&self, x: &[T]) -> T {
        self.c.dot(x)
    }

    /// dual objective bᵗy
    pub fn dual_objective(&self, y: &[T]) -> T {
        self.b.dot(y)
    }
}

#[test]
fn test_problemdata_checks() {
    let A = CscMatrix::<f64>::identity(3);

    assert!(ProblemData::new(&A, &[1.; 3], &[1.; 3]).is_ok());
    assert!(matches!(
        ProblemData::new(&A, &[1.; 2], &[1.; 3]),
        Err(ProblemDataError::IncompatibleDimension(_))
    ));
    assert!(matches!(
        ProblemData::new(&A, &[1.; 3], &[1.; 4]),
        Err(ProblemDataError::IncompatibleDimension(_))
    ));
    assert_eq!(
        ProblemData::new(&A, &[1., f64::NAN, 1.], &[1.; 3]).unwrap_err(),
        ProblemDataError::NonFinite("b")
    );

    let mut bad = A.clone();
    bad.rowval[1] = 7;
    assert!(matches!(
        ProblemData::new(&bad, &[1.; 3], &[1.; 3]),
        Err(ProblemDataError::BadFormat(_))
    ));
}

#[test]
fn test_example_lp() {
    let data = ProblemData::<f64>::example_lp();
    assert!(data.A.check_format().is_ok());
    assert_eq!(data.A.size(), (2, 5));
    assert_eq!(data.label(), "example_lp");

    let x = [4., 1., 0., 0., 0.];
    let y = [-1., -3.];
    assert_eq!(data.primal_objective(&x), -19.);
    assert_eq!(data.dual_objective(&y), -19.);
}
