#![allow(non_snake_case)]

use crate::algebra::{Adjoint, CscMatrix, FloatT, MatrixShape, ShapedMatrix, SparseFormatError};
use std::iter::zip;

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// `CscMatrix` constructor.
    ///
    /// # Panics
    /// Makes rudimentary dimensional compatibility checks and panics on
    /// failure.   This constructor does __not__
    /// ensure that rows indices are all in bounds or that data is arranged
    /// such that entries within each column appear in order of increasing
    /// row index.   Use [`check_format`](CscMatrix::check_format) for that.
    ///
    pub fn new(m: usize, n: usize, colptr: Vec<usize>, rowval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(rowval.len(), nzval.len());
        assert_eq!(colptr.len(), n + 1);
        assert_eq!(colptr[n], rowval.len());
        CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
        }
    }

    /// allocate space for a sparse matrix with `nnz` elements
    ///
    /// To make an m x n matrix of zeros, use
    /// ```no_run
    /// use rpdhg::algebra::CscMatrix;
    /// let A : CscMatrix<f64> = CscMatrix::spalloc(3,4,0);
    /// ```
    pub fn spalloc(m: usize, n: usize, nnz: usize) -> Self {
        let mut colptr = vec![0; n + 1];
        let rowval = vec![0; nnz];
        let nzval = vec![T::zero(); nnz];
        colptr[n] = nnz;

        CscMatrix::new(m, n, colptr, rowval, nzval)
    }

    /// Sparse matrix of zeros of size `m` x `n`
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        Self::spalloc(m, n, 0)
    }

    /// Identity matrix of size `n`
    pub fn identity(n: usize) -> Self {
        let colptr = (0usize..=n).collect();
        let rowval = (0usize..n).collect();
        let nzval = vec![T::one(); n];

        CscMatrix::new(n, n, colptr, rowval, nzval)
    }

    /// Build a matrix from (row, column, value) triplets.
    ///
    /// Entries may be given in any order.  Duplicate (row, column)
    /// pairs are summed.
    ///
    /// # Panics
    /// Panics if the triplet arrays have different lengths or if any
    /// index is out of bounds.
    pub fn new_from_triplets(m: usize, n: usize, I: &[usize], J: &[usize], V: &[T]) -> Self {
        assert_eq!(I.len(), J.len());
        assert_eq!(I.len(), V.len());
        assert!(I.iter().all(|&i| i < m));
        assert!(J.iter().all(|&j| j < n));

        // sort the triplets by column, then by row
        let mut order: Vec<usize> = (0..V.len()).collect();
        order.sort_by_key(|&k| (J[k], I[k]));

        let mut colptr = vec![0usize; n + 1];
        let mut rowval = Vec::with_capacity(V.len());
        let mut nzval: Vec<T> = Vec::with_capacity(V.len());
        let mut last: Option<(usize, usize)> = None;

        for k in order {
            let (i, j) = (I[k], J[k]);
            if last == Some((i, j)) {
                // duplicate entry.  Accumulate into the previous one
                if let Some(v) = nzval.last_mut() {
                    *v += V[k];
                }
                continue;
            }
            rowval.push(i);
            nzval.push(V[k]);
            colptr[j + 1] += 1;
            last = Some((i, j));
        }

        //convert counts to column pointers
        for j in 0..n {
            colptr[j + 1] += colptr[j];
        }

        CscMatrix::new(m, n, colptr, rowval, nzval)
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.colptr[self.n]
    }

    /// transpose
    pub fn t(&self) -> Adjoint<'_, Self> {
        Adjoint { src: self }
    }

    /// Check that matrix data is correctly formatted.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.rowval.len() != self.nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        if self.colptr.is_empty()
            || (self.colptr.len() - 1) != self.n
            || self.colptr[self.n] != self.rowval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //check for colptr monotonicity
        if self.colptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadColptr);
        }

        //check for rowval monotonicity within each column
        for col in 0..self.n {
            let rng = self.colptr[col]..self.colptr[col + 1];
            if self.rowval[rng].windows(2).any(|c| c[0] >= c[1]) {
                return Err(SparseFormatError::BadRowval);
            }
        }
        //check for row values out of bounds
        if !self.rowval.iter().all(|r| r < &self.m) {
            return Err(SparseFormatError::BadRowval);
        }

        Ok(())
    }

    /// Returns the value at the given (row,col) index as an Option.
    /// Returns None if the given index is not a structural nonzero.
    ///
    /// # Panics
    /// Panics if the given index is out of bounds.
    pub fn get_entry(&self, idx: (usize, usize)) -> Option<T> {
        let (row, col) = idx;
        assert!(row < self.nrows() && col < self.ncols());

        let first = self.colptr[col];
        let last = self.colptr[col + 1];
        let rows_in_this_column = &self.rowval[first..last];
        match rows_in_this_column.binary_search(&row) {
            Ok(idx) => Some(self.nzval[first + idx]),
            Err(_) => None,
        }
    }

    /// Squared Frobenius norm, used as a cheap upper bound
    /// on the squared spectral norm
    pub fn sumsq(&self) -> T {
        self.nzval.iter().fold(T::zero(), |acc, &v| acc + v * v)
    }

    /// Iterate over (row, column, value) for all structural nonzeros
    pub fn triplets(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        (0..self.n).flat_map(move |col| {
            let rng = self.colptr[col]..self.colptr[col + 1];
            zip(&self.rowval[rng.clone()], &self.nzval[rng]).map(move |(&row, &v)| (row, col, v))
        })
    }
}

impl<T> ShapedMatrix for CscMatrix<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
    fn shape(&self) -> MatrixShape {
        MatrixShape::N
    }
}

#[test]
fn test_csc_get_entry() {
    // A =
    //[ ⋅   4.0    ⋅    ⋅   12.0]
    //[1.0  5.0    ⋅    ⋅     ⋅ ]
    //[ ⋅   6.0    ⋅    ⋅   13.0]
    //[2.0  7.0  10.0   ⋅     ⋅ ]
    //[ ⋅   8.0  11.0   ⋅   14.0]
    //[3.0  9.0    ⋅    ⋅     ⋅ ]

    let A = CscMatrix::new(
        6,                                                                 // m
        5,                                                                 // n
        vec![0, 3, 9, 11, 11, 14],                                         // colptr
        vec![1, 3, 5, 0, 1, 2, 3, 4, 5, 3, 4, 0, 2, 4],                    // rowval
        vec![1., 2., 3., 4., 5., 6., 7., 8., 9., 10., 11., 12., 13., 14.], // nzval
    );

    assert_eq!(A.get_entry((1, 0)).unwrap(), 1.);
    assert_eq!(A.get_entry((5, 0)).unwrap(), 3.);
    assert_eq!(A.get_entry((0, 1)).unwrap(), 4.);
    assert_eq!(A.get_entry((3, 2)).unwrap(), 10.);
    assert_eq!(A.get_entry((4, 4)).unwrap(), 14.);
    assert_eq!(A.get_entry((0, 0)), None);
    assert_eq!(A.get_entry((2, 3)), None);
}
