use super::*;
use crate::algebra::*;
use crate::solver::core::SettingsError;
use enum_dispatch::*;
use std::marker::PhantomData;

/// Decides when the averaged iterate should replace the current one.
///
/// A policy only makes the decision.  The solver records the restart,
/// re-evaluates convergence and calls [`Iterates::restart`] when
/// `check_restart` returns true.
#[enum_dispatch]
pub trait RestartPolicy<T>
where
    T: FloatT,
{
    /// true if the iterates should restart after the most recent step
    fn check_restart(
        &mut self,
        iterates: &Iterates<T>,
        data: &ProblemData<T>,
        settings: &DefaultSettings<T>,
        gap: &mut GapEvaluator<T>,
    ) -> bool;

    /// true if the state immediately after a restart should be
    /// appended to the trajectory when on the record cadence
    fn record_after_restart(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str;
}

/// Restart policies selectable through the `restart_method` setting.
#[enum_dispatch(RestartPolicy<T>)]
#[derive(Debug, Clone)]
pub enum SupportedRestart<T>
where
    T: FloatT,
{
    NoRestart(NoRestart<T>),
    Adaptive(AdaptiveRestart<T>),
    FixedFrequency(FixedFrequencyRestart<T>),
}

impl<T> SupportedRestart<T>
where
    T: FloatT,
{
    pub fn new(restart_method: &str) -> Result<Self, SettingsError> {
        match restart_method {
            "none" => Ok(NoRestart::default().into()),
            "adaptive" => Ok(AdaptiveRestart::default().into()),
            "fixed" => Ok(FixedFrequencyRestart::default().into()),
            _ => Err(SettingsError::UnknownRestartMethod(
                restart_method.to_string(),
            )),
        }
    }
}

// ---------------
// never restart
// ---------------

#[derive(Debug, Clone, Default)]
pub struct NoRestart<T> {
    phantom: PhantomData<T>,
}

impl<T> RestartPolicy<T> for NoRestart<T>
where
    T: FloatT,
{
    fn check_restart(
        &mut self,
        _iterates: &Iterates<T>,
        _data: &ProblemData<T>,
        _settings: &DefaultSettings<T>,
        _gap: &mut GapEvaluator<T>,
    ) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

// ---------------
// adaptive restarts on sufficient decay of the normalized duality gap
// ---------------

#[derive(Debug, Clone, Default)]
pub struct AdaptiveRestart<T> {
    phantom: PhantomData<T>,
}

impl<T> RestartPolicy<T> for AdaptiveRestart<T>
where
    T: FloatT,
{
    fn check_restart(
        &mut self,
        iterates: &Iterates<T>,
        data: &ProblemData<T>,
        settings: &DefaultSettings<T>,
        gap: &mut GapEvaluator<T>,
    ) -> bool {
        if !settings.restart_enable || iterates.step() % settings.evaluate_every != 0 {
            return false;
        }

        // first epoch restarts on length alone
        if iterates.n == 0 {
            return iterates.t >= settings.tau0;
        }

        let current = &iterates.cache.current;
        let Some(previous) = iterates.cache.previous.as_ref() else {
            return false;
        };
        let r1 = iterates.z_bar.dist(current);
        let r2 = current.dist(previous);

        // an unavailable gap skips this decision point
        let Ok(gap_bar) = gap.evaluate(&iterates.z_bar, r1, data) else {
            return false;
        };
        let Ok(gap_start) = gap.evaluate(current, r2, data) else {
            return false;
        };
        gap_bar <= settings.beta * gap_start
    }

    fn name(&self) -> &'static str {
        "adaptive"
    }
}

// ---------------
// restarts at a fixed period
// ---------------

#[derive(Debug, Clone, Default)]
pub struct FixedFrequencyRestart<T> {
    phantom: PhantomData<T>,
}

impl<T> RestartPolicy<T> for FixedFrequencyRestart<T>
where
    T: FloatT,
{
    fn check_restart(
        &mut self,
        iterates: &Iterates<T>,
        _data: &ProblemData<T>,
        settings: &DefaultSettings<T>,
        _gap: &mut GapEvaluator<T>,
    ) -> bool {
        settings.restart_enable && iterates.step() % settings.restart_length == 0
    }

    fn record_after_restart(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}
