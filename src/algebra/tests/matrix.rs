#![allow(non_snake_case)]
use crate::algebra::*;

fn test_matrix_2x5() -> CscMatrix<f64> {
    // A =
    //[ 1.0    ⋅   1.0    ⋅    ⋅ ]
    //[ 1.0  1.0    ⋅     ⋅    ⋅ ]
    CscMatrix::new(
        2,
        5,
        vec![0, 2, 3, 4, 4, 4],
        vec![0, 1, 1, 0],
        vec![1., 1., 1., 1.],
    )
}

fn test_matrix_3x2() -> CscMatrix<f64> {
    // A =
    //[ 1.0  -2.0]
    //[  ⋅    3.0]
    //[ 4.0    ⋅ ]
    CscMatrix::new(3, 2, vec![0, 2, 4], vec![0, 2, 0, 1], vec![1., 4., -2., 3.])
}

#[test]
fn test_check_format() {
    assert!(test_matrix_2x5().check_format().is_ok());
    assert!(test_matrix_3x2().check_format().is_ok());

    let mut A = test_matrix_3x2();
    A.rowval[1] = 3;
    assert_eq!(A.check_format(), Err(SparseFormatError::BadRowval));

    let mut A = test_matrix_3x2();
    A.rowval.swap(0, 1);
    assert_eq!(A.check_format(), Err(SparseFormatError::BadRowval));

    let mut A = test_matrix_3x2();
    A.colptr[1] = 5;
    assert_eq!(A.check_format(), Err(SparseFormatError::BadColptr));

    let mut A = test_matrix_3x2();
    A.nzval.pop();
    assert_eq!(A.check_format(), Err(SparseFormatError::IncompatibleDimension));
}

#[test]
fn test_from_triplets() {
    // unsorted with a duplicate entry at (1,1)
    let I = [1, 0, 1, 0, 1];
    let J = [1, 2, 0, 0, 1];
    let V = [0.5, 1., 1., 1., 0.5];
    let A = CscMatrix::new_from_triplets(2, 5, &I, &J, &V);
    assert!(A.check_format().is_ok());
    assert_eq!(A, test_matrix_2x5());
}

#[test]
fn test_triplets_iter() {
    let A = test_matrix_3x2();
    let t: Vec<_> = A.triplets().collect();
    assert_eq!(t, vec![(0, 0, 1.), (2, 0, 4.), (0, 1, -2.), (1, 1, 3.)]);
}

#[test]
fn test_gemv() {
    let A = test_matrix_3x2();
    let x = vec![1., 2.];
    let mut y = vec![1., 1., 1.];

    // y = 2*A*x + y
    A.gemv(&mut y, &x, 2., 1.);
    assert_eq!(y, vec![-5., 13., 9.]);

    // y = -A*x
    A.gemv(&mut y, &x, -1., 0.);
    assert_eq!(y, vec![3., -6., -4.]);
}

#[test]
fn test_gemv_transpose() {
    let A = test_matrix_3x2();
    let x = vec![1., 2., 3.];
    let mut y = vec![1., -1.];

    // y = A'*x - y
    A.t().gemv(&mut y, &x, 1., -1.);
    assert_eq!(y, vec![12., 5.]);

    assert_eq!(A.t().size(), (2, 3));
    assert_eq!(A.t().shape(), MatrixShape::T);
}

#[test]
fn test_identity_and_zeros() {
    let I = CscMatrix::<f64>::identity(3);
    let mut y = vec![0.; 3];
    I.gemv(&mut y, &[1., 2., 3.], 1., 0.);
    assert_eq!(y, vec![1., 2., 3.]);

    let Z = CscMatrix::<f64>::zeros((2, 3));
    assert_eq!(Z.nnz(), 0);
    assert_eq!(Z.size(), (2, 3));
}
