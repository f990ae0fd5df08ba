//! Multi-run orchestration.
//!
//! Runs many independent annealing trajectories over one shared
//! [`Problem`](crate::problem::Problem), serially or on a rayon pool, then
//! reduces their results to the global best and an averaged energy curve.
//!
//! Trajectories share nothing mutable: each owns its generator, assignment
//! and history. The join before [`reduce`] is the only synchronization point.

mod config;
mod reduce;
mod runner;

pub use config::BatchConfig;
pub use reduce::{align_mean_curve, reduce, AggregateResult};
pub use runner::{seeded_factory, BatchRunner};
