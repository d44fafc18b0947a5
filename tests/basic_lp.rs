#![allow(non_snake_case)]

use rpdhg::{algebra::*, io::ConfigurablePrintTarget, solver::*};

fn example_lp_data() -> (CscMatrix<f64>, Vec<f64>, Vec<f64>) {
    let A = CscMatrix::new_from_triplets(
        2,
        5,
        &[0, 0, 1, 1],
        &[0, 2, 0, 1],
        &[1., 1., 1., 1.],
    );
    let b = vec![4., 5.];
    let c = vec![-4., -3., 0., 0., 0.];
    (A, b, c)
}

fn converging_settings() -> DefaultSettings<f64> {
    DefaultSettingsBuilder::default()
        .eta(0.5)
        .max_iter(20000)
        .build()
        .unwrap()
}

#[test]
fn test_lp_converges_without_gap() {
    let (A, b, c) = example_lp_data();

    let mut solver = DefaultSolver::new(&A, &b, &c, converging_settings()).unwrap();
    solver.solve();

    // with the gap switched off the run is never cut short
    assert_eq!(solver.solution.status, SolverStatus::MaxIterations);
    assert_eq!(solver.solution.iterations, 20000);
    assert_eq!(solver.recorder.len(), 666);
    assert!(solver.solution.info.kkt_error < 1e-7);
    assert!(solver.solution.info.normalized_duality_gap.is_none());

    let refsol = vec![4., 1., 0., 0., 0.];
    assert!(solver.solution.x.dist(&refsol) <= 1e-5);
    let refdual = vec![-1., -3.];
    assert!(solver.solution.y.dist(&refdual) <= 1e-5);

    let refobj = -19.;
    assert!(f64::abs(solver.solution.obj_val - refobj) <= 1e-5);
    assert!(f64::abs(solver.solution.obj_val_dual - refobj) <= 1e-5);
    assert!(solver.solution.x.iter().all(|&v| v >= 0.));
}

#[test]
fn test_lp_max_iterations() {
    let (A, b, c) = example_lp_data();

    let settings = DefaultSettingsBuilder::default()
        .max_iter(10)
        .build()
        .unwrap();

    let mut solver = DefaultSolver::new(&A, &b, &c, settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::MaxIterations);
    assert_eq!(solver.solution.iterations, 10);
    assert_eq!(solver.solution.restarts, 0);
    assert_eq!(solver.iterates.count, 11);
    assert!(solver.recorder.is_empty());
}

#[test]
fn test_lp_resolve_is_repeatable() {
    let (A, b, c) = example_lp_data();
    let settings = DefaultSettingsBuilder::default()
        .max_iter(500)
        .build()
        .unwrap();

    let mut solver = DefaultSolver::new(&A, &b, &c, settings).unwrap();
    solver.solve();
    let x1 = solver.solution.x.clone();
    let n1 = solver.recorder.len();

    solver.solve();
    assert_eq!(solver.solution.x, x1);
    assert_eq!(solver.recorder.len(), n1);
}

#[test]
fn test_lp_trajectory_cadence() {
    let (A, b, c) = example_lp_data();
    let settings = DefaultSettingsBuilder::default()
        .max_iter(95)
        .record_every(10)
        .build()
        .unwrap();

    let mut solver = DefaultSolver::new(&A, &b, &c, settings).unwrap();
    solver.solve();

    assert_eq!(solver.recorder.capacity(), 10);
    let steps: Vec<u32> = solver.recorder.entries().iter().map(|e| e.step).collect();
    assert_eq!(steps, vec![10, 20, 30, 40, 50, 60, 70, 80, 90]);

    // snapshots carry the matching step counter
    let entry = solver.recorder.get(2).unwrap();
    assert_eq!(entry.iterates.count, 31);
    assert!(entry.info.kkt_error > 0.);
    assert!(solver.recorder.get(9).is_err());
}

#[test]
fn test_lp_verbose_output() {
    let (A, b, c) = example_lp_data();
    let settings = DefaultSettingsBuilder::default()
        .max_iter(300)
        .verbose(true)
        .build()
        .unwrap();

    let mut solver = DefaultSolver::new(&A, &b, &c, settings).unwrap();
    solver.print_to_buffer();
    solver.solve();

    let text = solver.get_print_buffer().unwrap();
    assert!(text.contains("variables     = 5"));
    assert!(text.contains("Terminated with status = MaxIterations"));
    // progress lines at iterations 100, 200 and 300
    assert!(text.lines().any(|l| l.trim_start().starts_with("300 ")));
}
