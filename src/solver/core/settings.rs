use crate::solver::implementations::default::DefaultSettings;
use thiserror::Error;

/// Solver core settings are the same as in the default solver.
///
/// Go [here](crate::solver::implementations::default::DefaultSettings)
/// to view the complete list.
///
pub type CoreSettings<T> = DefaultSettings<T>;

#[derive(Error, Debug, PartialEq, Eq)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// An error attributable to one of the fields
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
    /// An unrecognized restart scheme
    #[error("Unknown restart method \"{0}\" (expected \"none\", \"adaptive\" or \"fixed\")")]
    UnknownRestartMethod(String),
}
