#![allow(non_snake_case)]

mod convergence;
mod gap_oracle;
mod info;
mod info_print;
mod iterates;
mod problemdata;
mod record;
mod restart;
mod settings;
mod solution;
mod solver;
mod step;
pub mod tuning;

//export flattened
pub use convergence::*;
pub use gap_oracle::*;
pub use info::*;
pub use iterates::*;
pub use problemdata::*;
pub use record::*;
pub use restart::*;
pub use settings::*;
pub use solution::*;
pub use solver::*;
pub use step::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "serde")] {
        mod json;
        pub use json::*;
    }
}
