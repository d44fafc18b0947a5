use rpdhg::{io::ConfigurablePrintTarget, solver::*};
use std::fs;

fn solved_with_restarts() -> DefaultSolver<f64> {
    let settings = DefaultSettingsBuilder::default()
        .max_iter(120)
        .record_every(30)
        .restart_method("fixed".to_string())
        .restart_length(50)
        .verbose(true)
        .build()
        .unwrap();
    let mut solver = DefaultSolver::new_from_data(ProblemData::example_lp(), settings).unwrap();
    solver.print_to_buffer();
    solver.solve();
    solver
}

#[test]
fn test_save_trajectory() {
    let dir = tempfile::tempdir().unwrap();
    let mut solver = solved_with_restarts();

    let (info_path, idx_path) = solver.save_trajectory(dir.path(), "run0").unwrap();
    assert_eq!(info_path, dir.path().join("fixed/example_lp/run0.csv"));
    assert_eq!(idx_path, dir.path().join("fixed/example_lp/run0_restart_idx.csv"));

    let text = fs::read_to_string(&info_path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("step,normalized_duality_gap,kkt_error"));
    let rows: Vec<Vec<&str>> = lines.map(|l| l.split(',').collect()).collect();
    assert_eq!(rows.len(), solver.recorder.len());
    assert_eq!(rows[0][0], "30");
    assert!(rows.iter().all(|r| r[1] == "nan"));
    assert!(rows.iter().all(|r| r[2].parse::<f64>().unwrap() >= 0.));

    let idx = fs::read_to_string(&idx_path).unwrap();
    assert_eq!(idx, "50\n100\n");
}

#[test]
fn test_save_trajectory_unnamed_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let example = ProblemData::<f64>::example_lp();
    let data = ProblemData::new(&example.A, &example.b, &example.c).unwrap();
    assert!(data.name.is_none());

    let settings = DefaultSettingsBuilder::<f64>::default()
        .max_iter(60)
        .dataset_idx(3)
        .build()
        .unwrap();
    let mut solver = DefaultSolver::new_from_data(data, settings).unwrap();
    solver.solve();

    let (info_path, idx_path) = solver.save_trajectory(dir.path(), "run1").unwrap();
    assert_eq!(info_path, dir.path().join("none/dataset_3/run1.csv"));
    assert_eq!(idx_path, dir.path().join("none/dataset_3/run1_restart_idx.csv"));

    // no restarts, so the index file is empty
    assert_eq!(fs::read_to_string(&idx_path).unwrap(), "");
}

#[test]
fn test_save_trajectory_failure_warns() {
    let dir = tempfile::tempdir().unwrap();
    // a plain file where a directory is needed
    let blocker = dir.path().join("blocked");
    fs::write(&blocker, "not a directory").unwrap();

    let mut solver = solved_with_restarts();
    assert!(solver.save_trajectory(&blocker, "run0").is_none());

    // the in-memory result is untouched
    assert!(!solver.recorder.is_empty());
    let text = solver.get_print_buffer().unwrap();
    assert!(text.contains("warning: could not save trajectory"));
}

#[cfg(feature = "serde")]
#[test]
fn test_trajectory_json() {
    use std::io::{Seek, SeekFrom};

    let solver = solved_with_restarts();
    let mut file = tempfile::tempfile().unwrap();
    solver.recorder.write_to_json(&mut file).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let trajectory = JsonTrajectory::<f64>::read_from_file(&mut file).unwrap();
    assert_eq!(trajectory.restart_idx, vec![50, 100]);
    assert_eq!(trajectory.records.len(), solver.recorder.len());
}
