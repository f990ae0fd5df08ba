//! Trajectory result.

use crate::assignment::Assignment;

/// Outcome of one annealing trajectory.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult {
    /// Lowest-energy assignment seen during the trajectory.
    pub best_assignment: Assignment,

    /// Energy of `best_assignment`.
    pub best_energy: usize,

    /// Current energy at the end of each temperature level.
    pub energy_history: Vec<usize>,

    /// Number of temperature levels executed.
    pub temperature_levels: usize,

    /// Total neighbor evaluations.
    pub iterations: usize,

    /// Accepted moves, including improvements.
    pub accepted_moves: usize,

    /// Strictly improving moves.
    pub improving_moves: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Seed the trajectory's generator was built from, when known.
    pub seed: Option<u64>,
}

impl RunResult {
    pub fn is_satisfying(&self) -> bool {
        self.best_energy == 0
    }
}
