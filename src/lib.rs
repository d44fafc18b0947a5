//! __rpdhg__ is a Rust implementation of the restarted primal-dual hybrid
//! gradient (PDHG) method for linear programs of the form
//!
//! $$
//! \begin{array}{rl}
//! \text{minimize} & c^T x\\\\\[2ex\]
//!  \text{subject to} & Ax = b \\\\\[1ex\]
//!         & x \ge 0
//!  \end{array}
//! $$
//!
//! with decision variables $x \in \mathbb{R}^n$ and data
//! $c \in \mathbb{R}^n$, $b \in \mathbb{R}^m$ and sparse
//! $A \in \mathbb{R}^{m \times n}$.
//!
//! ## Features
//!
//! * __Restarts__: the averaged iterate can be restarted at a fixed period or
//!   adaptively, when the normalized duality gap has decayed sufficiently.
//!
//! * __Pluggable duality gap__: the normalized duality gap subproblem is
//!   solved by any type implementing
//!   [`DualityGapOracle`](crate::solver::DualityGapOracle).   A built in
//!   oracle based on a trust region projection is provided.
//!
//! * __Trajectories__: convergence histories and restart points are recorded
//!   and can be saved as csv or (with the `serde` feature) json.
//!
//! # Example
//!
//! ```
//! use rpdhg::solver::*;
//!
//! let data = ProblemData::<f64>::example_lp();
//! let settings = DefaultSettingsBuilder::default()
//!     .max_iter(2000)
//!     .restart_method("fixed".to_string())
//!     .restart_length(64)
//!     .build()
//!     .unwrap();
//!
//! let mut solver = DefaultSolver::new_from_data(data, settings).unwrap();
//! solver.solve();
//! println!("x = {:?}", solver.solution.x);
//! ```

//Rust hates greek characters
#![allow(confusable_idents)]

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod algebra;
pub mod io;
pub mod solver;
pub mod timers;
