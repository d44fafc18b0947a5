use rpdhg::solver::tuning::*;
use rpdhg::solver::*;

fn main() {
    let data = ProblemData::<f64>::example_lp();

    let norm = estimate_operator_norm(&data.A);
    let eta = suggest_step_size(&data.A);
    println!("‖A‖₂ ≈ {norm:.6}, step size = {eta:.6}");

    let settings = DefaultSettingsBuilder::default()
        .eta(eta)
        .max_iter(2000)
        .build()
        .unwrap();

    let weights = optimal_primal_weight(&data, &settings).unwrap();
    for (w, kkt) in &weights.trials {
        println!("  w = {w:>12.6e}  kkt = {kkt:.3e}");
    }
    println!("best primal weight = {:.6e}", weights.best);

    let mut settings = settings;
    settings.w = weights.best;
    let lengths = best_fixed_restart_length(&data, &settings).unwrap();
    for (len, kkt) in &lengths.trials {
        println!("  restart length = {len:>6}  kkt = {kkt:.3e}");
    }
    println!("best restart length = {}", lengths.best);
}
