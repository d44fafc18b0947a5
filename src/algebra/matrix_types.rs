// All internal matrix representations in the solver
// are in standard compressed sparse column format,
// as is the API.

/// Sparse matrix in standard Compressed Sparse Column (CSC) format
///
/// __Example usage__ : To construct the 2 x 5 constraint matrix
/// ```text
/// A = [1.  0.  1.  0.  0.]
///     [1.  1.  0.  0.  0.]
/// ```
///
/// ```no_run
/// use rpdhg::algebra::CscMatrix;
///
/// let A : CscMatrix<f64> = CscMatrix::new(
///    2,                       // m
///    5,                       // n
///    vec![0, 2, 3, 4, 4, 4],  //colptr
///    vec![0, 1, 1, 0],        //rowval
///    vec![1., 1., 1., 1.],    //nzval
///  );
///
/// // optional correctness check
/// assert!(A.check_format().is_ok());
/// ```
///
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CscMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// CSC format column pointer.
    ///
    /// Ths field should have length `n+1`. The last entry corresponds
    /// to the the number of nonzeros and should agree with the lengths
    /// of the `rowval` and `nzval` fields.
    pub colptr: Vec<usize>,
    /// vector of row indices
    pub rowval: Vec<usize>,
    /// vector of non-zero matrix elements
    pub nzval: Vec<T>,
}

/// Matrix orientation marker
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum MatrixShape {
    /// Normal matrix orientation
    N,
    /// Transposed matrix orientation
    T,
}

/// Borrowed adjoint (transpose) of a matrix.   Produced by
/// [`CscMatrix::t`](crate::algebra::CscMatrix::t)
#[derive(Debug, Clone, Copy)]
pub struct Adjoint<'a, M> {
    pub src: &'a M,
}
