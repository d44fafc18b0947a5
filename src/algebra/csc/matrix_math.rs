use crate::algebra::*;

impl<T: FloatT> MatrixVectorMultiply for CscMatrix<T> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_axpby_N(self, y, x, a, b);
    }
}

impl<T: FloatT> MatrixVectorMultiply for Adjoint<'_, CscMatrix<T>> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_axpby_T(self.src, y, x, a, b);
    }
}

// y = b*y, with the common cases short-circuited
fn _scale_output<T: FloatT>(y: &mut [T], b: T) {
    if b == T::zero() {
        y.fill(T::zero());
    } else if b == -T::one() {
        y.negate();
    } else if b != T::one() {
        y.scale(b);
    }
}

// sparse matrix-vector multiply, no transpose
#[allow(non_snake_case)]
fn _csc_axpby_N<T: FloatT>(A: &CscMatrix<T>, y: &mut [T], x: &[T], a: T, b: T) {
    assert_eq!(x.len(), A.n);
    assert_eq!(y.len(), A.m);

    _scale_output(y, b);

    // if a is zero, we're done
    if a == T::zero() {
        return;
    }

    //y += a*A*x
    for (j, &xj) in x.iter().enumerate() {
        let axj = a * xj;
        for k in A.colptr[j]..A.colptr[j + 1] {
            y[A.rowval[k]] += A.nzval[k] * axj;
        }
    }
}

// sparse matrix-vector multiply, transposed
#[allow(non_snake_case)]
fn _csc_axpby_T<T: FloatT>(A: &CscMatrix<T>, y: &mut [T], x: &[T], a: T, b: T) {
    assert_eq!(x.len(), A.m);
    assert_eq!(y.len(), A.n);

    _scale_output(y, b);

    if a == T::zero() {
        return;
    }

    //y += a*A'*x
    for (j, yj) in y.iter_mut().enumerate() {
        let mut acc = T::zero();
        for k in A.colptr[j]..A.colptr[j + 1] {
            acc += A.nzval[k] * x[A.rowval[k]];
        }
        *yj += a * acc;
    }
}
