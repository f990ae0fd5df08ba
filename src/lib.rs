//! Simulated-annealing heuristic for Boolean satisfiability.
//!
//! Searches for a truth assignment minimizing the number of unsatisfied
//! clauses of a CNF formula, and aggregates statistics over many
//! independent runs.
//!
//! - **Problem** ([`problem`]): validated clause set and energy evaluation.
//! - **Assignment** ([`assignment`]): bit vector with single-flip neighbors.
//! - **Annealing** ([`anneal`]): one trajectory with geometric cooling and a
//!   selectable acceptance policy.
//! - **Batch** ([`batch`]): independent trajectories, serial or on rayon,
//!   reduced to a global best and a mean energy curve.
//! - **DIMACS** ([`dimacs`]) and **report** ([`report`]): input parsing and
//!   output formatting around the core.
//!
//! This is an incomplete solver: it never proves unsatisfiability and may
//! miss satisfying assignments.
//!
//! # Examples
//!
//! ```
//! use sat_anneal::anneal::AnnealConfig;
//! use sat_anneal::batch::{BatchConfig, BatchRunner};
//! use sat_anneal::problem::Problem;
//!
//! let problem = Problem::build(3, [vec![1, -2], vec![2, 3], vec![-1, -3]]).unwrap();
//! let anneal = AnnealConfig::new(10.0, 1e-3, 0.95).with_max_iterations(500);
//! let batch = BatchConfig::new(4).with_seed(42);
//!
//! let result = BatchRunner::run_many(&problem, &anneal, &batch).unwrap();
//! assert_eq!(result.global_best_energy, 0);
//! ```

pub mod anneal;
pub mod assignment;
pub mod batch;
pub mod dimacs;
pub mod error;
pub mod problem;
pub mod random;
pub mod report;
pub mod settings;

pub use error::{Result, SatError};
