//! Restarted PDHG solver main module.
//!
//! This module contains the main types and traits for the solver.
//!
//! The solver comes with a [default implementation](crate::solver::implementations::default)
//! for linear programs in the standard form described in the top level
//! [API page](crate).   The duality gap subproblem is supplied through the
//! [`DualityGapOracle`](crate::solver::core::traits::DualityGapOracle) trait.

// internal module structure
pub(crate) mod core;
pub mod implementations;
pub mod utils;

//Here we expose only part of the solver internals
//and rearrange public modules a bit to give a more
//user friendly API

//user facing types and traits required to interact with solver
pub use crate::solver::core::traits;
pub use crate::solver::core::traits::{DualityGapOracle, GapError};
pub use crate::solver::core::{CoreSettings, SettingsError, SolverStatus};

pub use crate::solver::utils::trust_region;

pub use crate::solver::implementations::default;
pub use crate::solver::implementations::default::*;
