#![allow(non_snake_case)]

use rpdhg::algebra::*;
use rpdhg::solver::*;

fn problem_data() -> (CscMatrix<f64>, Vec<f64>, Vec<f64>) {
    // x₁ + x₃ = 4
    // x₁ + x₂ = 5
    let A = CscMatrix::new(
        2,                     // m
        5,                     // n
        vec![0, 2, 3, 4, 4, 4], // colptr
        vec![0, 1, 1, 0],      // rowval
        vec![1., 1., 1., 1.],  // nzval
    );

    let b = vec![4., 5.];
    let c = vec![-4., -3., 0., 0., 0.];

    (A, b, c)
}

fn main() {
    let (A, b, c) = problem_data();

    let settings = DefaultSettingsBuilder::default()
        .eta(tuning::suggest_step_size(&A))
        .max_iter(100000)
        .restart_method("fixed".to_string())
        .restart_length(256)
        .verbose(true)
        .build()
        .unwrap();

    let mut solver = DefaultSolver::new(&A, &b, &c, settings).unwrap();

    solver.solve();

    println!("x = {:?}", solver.solution.x);
    println!("y = {:?}", solver.solution.y);
}
