#![allow(non_snake_case)]

use rpdhg::{io::ConfigurablePrintTarget, solver::*};

fn restart_settings(method: &str) -> DefaultSettingsBuilder<f64> {
    let mut builder = DefaultSettingsBuilder::default();
    builder
        .restart_method(method.to_string())
        // keep the KKT fallback from ending the run early
        .tol_kkt(1e-30);
    builder
}

fn always_zero(_z0: &[f64], _r: f64, _data: &ProblemData<f64>) -> Result<f64, GapError> {
    Ok(0.0)
}

fn always_fails(_z0: &[f64], _r: f64, _data: &ProblemData<f64>) -> Result<f64, GapError> {
    Err(GapError::SubproblemFailed("solver unavailable".to_string()))
}

#[test]
fn test_no_restarts() {
    let settings = restart_settings("none").max_iter(500).build().unwrap();
    let mut solver = DefaultSolver::new_from_data(ProblemData::example_lp(), settings).unwrap();
    solver.solve();

    assert!(solver.recorder.restart_indices().is_empty());
    assert_eq!(solver.solution.restarts, 0);
}

#[test]
fn test_fixed_frequency_restarts() {
    let settings = restart_settings("fixed")
        .restart_length(10)
        .max_iter(99)
        .build()
        .unwrap();
    let mut solver = DefaultSolver::new_from_data(ProblemData::example_lp(), settings).unwrap();
    solver.solve();

    let expected: Vec<u32> = (1..=9).map(|k| 10 * k).collect();
    assert_eq!(solver.recorder.restart_indices(), expected.as_slice());
    assert_eq!(solver.solution.restarts, 9);
    assert_eq!(solver.solution.status, SolverStatus::MaxIterations);
}

#[test]
fn test_fixed_frequency_resets_epoch() {
    let data = ProblemData::<f64>::example_lp();
    let settings = restart_settings("fixed")
        .restart_length(10)
        .build()
        .unwrap();
    let mut policy = SupportedRestart::<f64>::new("fixed").unwrap();
    let mut gap = GapEvaluator::<f64>::new(settings.gap_failure_limit);
    let mut step = PdhgStep::<f64>::new(data.nx, data.ny);
    let mut iterates = Iterates::<f64>::new(data.nx, data.ny);

    let mut restarts = vec![];
    while iterates.count <= 99 {
        step.step(&mut iterates, &data, settings.eta, settings.w);
        if policy.check_restart(&iterates, &data, &settings, &mut gap) {
            restarts.push(iterates.step());
            let z_bar = iterates.z_bar.clone();
            iterates.restart();
            assert_eq!(iterates.t, 0);
            assert_eq!(iterates.z, z_bar);
            assert_eq!(iterates.cache.current, z_bar);
        }
    }
    assert_eq!(restarts, vec![10, 20, 30, 40, 50, 60, 70, 80, 90]);
    assert_eq!(iterates.n, 9);
}

#[test]
fn test_restarts_disabled() {
    let settings = restart_settings("fixed")
        .restart_length(10)
        .restart_enable(false)
        .max_iter(99)
        .build()
        .unwrap();
    let mut solver = DefaultSolver::new_from_data(ProblemData::example_lp(), settings).unwrap();
    solver.solve();

    assert!(solver.recorder.restart_indices().is_empty());
}

#[test]
fn test_adaptive_with_decaying_gap() {
    let settings = restart_settings("adaptive")
        .evaluate_every(30)
        .max_iter(200)
        .build()
        .unwrap();
    let mut solver = DefaultSolver::new_from_data(ProblemData::example_lp(), settings).unwrap();
    solver.set_gap_oracle(always_zero);
    solver.solve();

    assert_eq!(
        solver.recorder.restart_indices(),
        &[30, 60, 90, 120, 150, 180]
    );
    assert_eq!(solver.solution.restarts, 6);
}

#[test]
fn test_adaptive_with_failing_gap() {
    let settings = restart_settings("adaptive")
        .evaluate_every(30)
        .max_iter(200)
        .verbose(true)
        .build()
        .unwrap();
    let mut solver = DefaultSolver::new_from_data(ProblemData::example_lp(), settings).unwrap();
    solver.print_to_buffer();
    solver.set_gap_oracle(always_fails);
    solver.solve();

    // the first restart needs no gap, later ones are skipped
    assert_eq!(solver.recorder.restart_indices(), &[30]);
    assert_eq!(solver.solution.status, SolverStatus::MaxIterations);
    assert!(solver.gap.is_disabled());

    let text = solver.get_print_buffer().unwrap();
    assert_eq!(text.matches("duality gap disabled").count(), 1);
}

#[test]
fn test_adaptive_without_oracle() {
    let settings = restart_settings("adaptive")
        .evaluate_every(30)
        .max_iter(200)
        .build()
        .unwrap();
    let mut solver = DefaultSolver::new_from_data(ProblemData::example_lp(), settings).unwrap();
    solver.solve();

    assert_eq!(solver.recorder.restart_indices(), &[30]);
}
