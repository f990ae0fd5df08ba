//! Simulated Annealing over clause-satisfaction energy.
//!
//! A single trajectory starts from a random [`Assignment`](crate::assignment::Assignment),
//! proposes one-variable flips, and accepts worsening moves with a probability that
//! falls as the temperature cools geometrically. The best assignment seen is kept.
//!
//! # Key Types
//!
//! - [`AnnealConfig`]: temperatures, cooling rate, inner iterations, level cap
//! - [`AcceptancePolicy`]: `StrictImprovement` or `Metropolis`
//! - [`Annealer`]: runs one trajectory
//! - [`RunResult`]: best assignment, best energy and per-level energy history
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod config;
mod runner;
mod types;

pub use config::{AcceptancePolicy, AnnealConfig};
pub use runner::Annealer;
pub use types::RunResult;
