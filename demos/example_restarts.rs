use rpdhg::solver::*;

// Compare restart schemes on the same problem, using the
// trust region oracle for the adaptive scheme's gap queries.

fn main() {
    let data = ProblemData::<f64>::example_lp();
    let dir = std::env::temp_dir().join("rpdhg");

    for method in ["none", "fixed", "adaptive"] {
        let settings = DefaultSettingsBuilder::default()
            .max_iter(20000)
            .restart_method(method.to_string())
            .restart_length(128)
            .build()
            .unwrap();

        let mut solver = DefaultSolver::new_from_data(data.clone(), settings).unwrap();
        solver.set_gap_oracle(TrustRegionGapOracle::new());
        solver.solve();

        let sol = &solver.solution;
        println!(
            "{:>8}: status = {}, iterations = {}, restarts = {}, kkt = {:.3e}",
            method, sol.status, sol.iterations, sol.restarts, sol.info.kkt_error
        );

        if let Some((info, _)) = solver.save_trajectory(&dir, "example") {
            println!("          trajectory saved to {}", info.display());
        }
    }
}
