#![allow(non_snake_case)]
use super::*;
use crate::algebra::*;
use crate::io::ConfigurablePrintTarget;
use crate::solver::core::{traits::DualityGapOracle, SettingsError, SolverStatus};
use crate::timers::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type returned by solver construction.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("Invalid problem data: {0}")]
    Data(#[from] ProblemDataError),
    #[error("Data formatting error")]
    BadFormat(#[from] SparseFormatError),
    #[error("Trajectory would have zero capacity (max_iter = {max_iter}, record_every = {record_every})")]
    ZeroRecordCapacity { max_iter: u32, record_every: u32 },
}

/// Restarted PDHG solver for linear programs in the form
///
/// min cᵗx  s.t.  Ax = b,  x ≥ 0
///
/// The solver owns its iterates, workspaces and trajectory.  Each call to
/// [`solve`](DefaultSolver::solve) starts again from the origin.

pub struct DefaultSolver<T: FloatT = f64> {
    pub data: ProblemData<T>,
    pub iterates: Iterates<T>,
    pub step: PdhgStep<T>,
    pub evaluator: ConvergenceEvaluator<T>,
    pub gap: GapEvaluator<T>,
    pub restart: SupportedRestart<T>,
    pub recorder: Recorder<T>,
    pub info: DefaultInfo<T>,
    pub solution: DefaultSolution<T>,
    pub settings: DefaultSettings<T>,
    pub timers: Option<Timers>,
}

impl<T> DefaultSolver<T>
where
    T: FloatT,
{
    pub fn new(
        A: &CscMatrix<T>,
        b: &[T],
        c: &[T],
        settings: DefaultSettings<T>,
    ) -> Result<Self, SolverError> {
        let data = ProblemData::new(A, b, c)?;
        Self::new_from_data(data, settings)
    }

    pub fn new_from_data(
        data: ProblemData<T>,
        settings: DefaultSettings<T>,
    ) -> Result<Self, SolverError> {
        settings.validate()?;

        let capacity = settings.record_capacity();
        if capacity == 0 {
            return Err(SolverError::ZeroRecordCapacity {
                max_iter: settings.max_iter,
                record_every: settings.record_every,
            });
        }

        let mut timers = Timers::default();
        let mut output;

        timeit! {timers => "setup"; {

        let (nx, ny) = (data.nx, data.ny);
        let restart = SupportedRestart::new(&settings.restart_method)?;

        output = Self {
            iterates: Iterates::new(nx, ny),
            step: PdhgStep::new(nx, ny),
            evaluator: ConvergenceEvaluator::new(nx, ny),
            gap: GapEvaluator::new(settings.gap_failure_limit),
            restart,
            recorder: Recorder::new(capacity),
            info: DefaultInfo::new(),
            solution: DefaultSolution::new(nx, ny),
            data,
            settings,
            timers: None,
        };

        }} //end "setup" timer.

        //now that the timer is finished we can swap our
        //timer object into the solver structure
        output.timers.replace(timers);
        Ok(output)
    }

    /// Attach the collaborator used for normalized duality gap queries.
    pub fn set_gap_oracle(&mut self, oracle: impl DualityGapOracle<T> + 'static) {
        self.gap.set_oracle(Box::new(oracle));
    }

    /// Run the solver from the origin until termination.
    pub fn solve(&mut self) {
        //timers is stored as an option so that
        //we can swap it out here and avoid
        //borrow conflicts with other fields.
        let mut timers = self.timers.take().unwrap_or_default();

        self.reset();

        notimeit! {timers; {
            let _ = _print_banner(&mut self.info, &self.settings);
            let _ = self.info.print_configuration(&self.settings, &self.data, &self.restart);
            let _ = self.info.print_status_header(&self.settings);
        }}

        self.info.reset(&mut timers);

        timeit! {timers => "solve"; {

        // ----------
        // main loop
        // ----------

        loop {
            timeit!{timers => "step"; {
                self.step.step(&mut self.iterates, &self.data, self.settings.eta, self.settings.w);
            }}

            let k = self.iterates.step();
            let on_record = k % self.settings.record_every == 0;
            let on_print = k % self.settings.print_every == 0;

            if on_record || on_print {
                timeit!{timers => "evaluate"; {
                    self.evaluate();
                }}
                if on_record {
                    self.record();
                }
                if on_print {
                    notimeit!{timers; {
                        let _ = self.info.print_status(&self.settings, &self.iterates, &self.data);
                    }}
                }
            }

            timeit!{timers => "restart"; {
                let fire = self.restart.check_restart(
                    &self.iterates, &self.data, &self.settings, &mut self.gap
                );
                if fire {
                    self.apply_restart();
                }
            }}
            self.warn_if_gap_disabled();

            if self.iterates.terminate {
                self.info.status = SolverStatus::Solved;
                break;
            }
            if self.iterates.count > self.settings.max_iter {
                self.info.status = SolverStatus::MaxIterations;
                break;
            }
        }

        }} // end "solve" timer

        //store final solution, timing etc
        self.info.finalize(&self.iterates, &timers);
        self.solution.finalize(&self.data, &self.iterates, &self.info);

        let _ = self.info.print_footer(&self.settings);

        //stow the timers back into Option in the solver struct
        self.timers.replace(timers);
    }

    /// Save the convergence history and restart indices as csv files under
    /// `<dir>/<restart method>/<dataset>/`, where the dataset is the problem
    /// name if one was given and `dataset_<dataset_idx>` otherwise.  Failures
    /// are reported as a warning on the print target and return `None`.
    pub fn save_trajectory(
        &mut self,
        dir: impl AsRef<Path>,
        filename: &str,
    ) -> Option<(PathBuf, PathBuf)> {
        let dir = dir.as_ref();
        let method = self.restart.name();
        let dataset = match &self.data.name {
            Some(name) => name.clone(),
            None => format!("dataset_{}", self.settings.dataset_idx),
        };
        let dataset = dataset.as_str();

        let result = self
            .recorder
            .save_convergence_info(dir, method, dataset, filename)
            .and_then(|info| {
                self.recorder
                    .save_restart_indices(dir, method, dataset, filename)
                    .map(|idx| (info, idx))
            });

        match result {
            Ok(paths) => Some(paths),
            Err(e) => {
                let msg = format!("could not save trajectory to {}: {}", dir.display(), e);
                let _ = self.info.print_warning(&self.settings, &msg);
                None
            }
        }
    }

    // ---------------
    // internal helpers
    // ---------------

    fn reset(&mut self) {
        let (nx, ny) = (self.data.nx, self.data.ny);
        self.iterates = Iterates::new(nx, ny);
        self.recorder = Recorder::new(self.settings.record_capacity());
        self.gap.reset();
        self.solution = DefaultSolution::new(nx, ny);
    }

    fn evaluate(&mut self) {
        self.evaluator
            .evaluate(&mut self.iterates, &self.data, &self.settings, &mut self.gap);
    }

    fn record(&mut self) {
        if let Err(e) = self.recorder.append(&self.iterates) {
            let _ = self.info.print_warning(&self.settings, &e.to_string());
        }
    }

    fn apply_restart(&mut self) {
        self.recorder.push_restart(self.iterates.step());
        self.evaluate();
        let _ = self.info.print_restart(&self.settings, &self.iterates);
        let _ = self.info.print_status(&self.settings, &self.iterates, &self.data);

        self.iterates.restart();

        if self.restart.record_after_restart()
            && self.iterates.step() % self.settings.record_every == 0
        {
            self.record();
        }
    }

    fn warn_if_gap_disabled(&mut self) {
        if self.gap.take_disabled_notice() {
            let msg = format!(
                "duality gap disabled after {} consecutive failures, using the KKT criterion",
                self.settings.gap_failure_limit
            );
            let _ = self.info.print_warning(&self.settings, &msg);
        }
    }
}

impl<T> ConfigurablePrintTarget for DefaultSolver<T>
where
    T: FloatT,
{
    fn print_to_stdout(&mut self) {
        self.info.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.info.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        self.info.print_to_stream(stream)
    }
    fn print_to_sink(&mut self) {
        self.info.print_to_sink()
    }
    fn print_to_buffer(&mut self) {
        self.info.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.info.get_print_buffer()
    }
}

fn _print_banner<T: FloatT>(
    info: &mut DefaultInfo<T>,
    settings: &DefaultSettings<T>,
) -> std::io::Result<()> {
    if !settings.verbose {
        return Ok(());
    }

    let out = info.print_target();
    writeln!(out, "-------------------------------------------------------")?;
    writeln!(
        out,
        "         rpdhg v{}  -  restarted PDHG for LPs        ",
        crate::VERSION
    )?;
    writeln!(out, "-------------------------------------------------------")?;
    Ok(())
}
