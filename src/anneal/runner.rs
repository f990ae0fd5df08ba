//! Annealing trajectory loop.

use super::config::AnnealConfig;
use super::types::RunResult;
use crate::assignment::Assignment;
use crate::error::Result;
use crate::problem::Problem;
use crate::random::create_rng;
use rand::Rng;
use tracing::trace;

/// Temperature levels between progress traces.
const PROGRESS_INTERVAL: usize = 1000;

/// Upper bound on history preallocation.
const MAX_HISTORY_RESERVE: usize = 1 << 16;

/// Executes one Simulated Annealing trajectory.
pub struct Annealer;

impl Annealer {
    /// Runs a trajectory with a generator built from `seed`.
    pub fn run_seeded(problem: &Problem, config: &AnnealConfig, seed: u64) -> Result<RunResult> {
        let mut rng = create_rng(seed);
        let mut result = Self::run(problem, config, &mut rng)?;
        result.seed = Some(seed);
        Ok(result)
    }

    /// Runs a trajectory, drawing every random decision from `rng`.
    ///
    /// The initial assignment is the first thing drawn, so a generator in a
    /// known state always yields a known starting point.
    ///
    /// # Errors
    /// [`SatError::InvalidParameter`](crate::error::SatError::InvalidParameter)
    /// if `config` fails validation. Nothing else fails for a built problem.
    pub fn run<R: Rng>(problem: &Problem, config: &AnnealConfig, rng: &mut R) -> Result<RunResult> {
        config.validate()?;

        // Initializing
        let mut current = Assignment::random(problem.num_variables(), rng);
        let mut current_energy = problem.energy(&current)?;
        let mut best = current.clone();
        let mut best_energy = current_energy;
        let mut temperature = config.initial_temperature;

        if problem.num_variables() == 0 {
            return Ok(RunResult {
                best_assignment: best,
                best_energy,
                energy_history: Vec::new(),
                temperature_levels: 0,
                iterations: 0,
                accepted_moves: 0,
                improving_moves: 0,
                final_temperature: temperature,
                seed: None,
            });
        }

        trace!(energy = current_energy, temperature, "trajectory initialized");

        let mut energy_history =
            Vec::with_capacity(config.expected_levels().min(MAX_HISTORY_RESERVE));
        let mut levels = 0usize;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;

        // Cooling
        while temperature > config.min_temperature
            && config.max_iterations.is_none_or(|cap| levels < cap)
        {
            for _ in 0..config.iterations_per_temperature {
                let neighbor = current.flip_neighbor(rng);
                let neighbor_energy = problem.energy(&neighbor)?;
                let delta = neighbor_energy as i64 - current_energy as i64;

                let accept = config
                    .acceptance
                    .accepts(delta, temperature, || rng.random_range(0.0..1.0));

                if accept {
                    if delta < 0 {
                        improving_moves += 1;
                    }
                    current = neighbor;
                    current_energy = neighbor_energy;
                    accepted_moves += 1;

                    if current_energy < best_energy {
                        best = current.clone();
                        best_energy = current_energy;
                    }
                }

                iterations += 1;
            }

            energy_history.push(current_energy);
            temperature *= config.cooling_rate;
            levels += 1;

            if levels.is_multiple_of(PROGRESS_INTERVAL) {
                trace!(
                    level = levels,
                    energy = current_energy,
                    best = best_energy,
                    temperature,
                    "annealing progress"
                );
            }
        }

        // Terminated
        Ok(RunResult {
            best_assignment: best,
            best_energy,
            energy_history,
            temperature_levels: levels,
            iterations,
            accepted_moves,
            improving_moves,
            final_temperature: temperature,
            seed: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anneal::AcceptancePolicy;
    use crate::error::SatError;

    fn classic() -> AnnealConfig {
        AnnealConfig::new(1000.0, 1e-5, 0.99).with_max_iterations(1000)
    }

    /// (x1 v x2 v !x3) & (!x1 v x3) & (x2 v x3) & (!x2 v !x3 v x4) & (x4)
    fn small_satisfiable() -> Problem {
        Problem::build(
            4,
            [
                vec![1, 2, -3],
                vec![-1, 3],
                vec![2, 3],
                vec![-2, -3, 4],
                vec![4],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_history_has_one_sample_per_level() {
        let problem = small_satisfiable();
        let result = Annealer::run_seeded(&problem, &classic(), 42).unwrap();
        assert_eq!(result.temperature_levels, 1000);
        assert_eq!(result.energy_history.len(), 1000);
        assert_eq!(result.iterations, 1000);
        assert_eq!(result.seed, Some(42));
    }

    #[test]
    fn test_inner_iterations_per_level() {
        let problem = small_satisfiable();
        let config = classic()
            .with_iterations_per_temperature(7)
            .with_max_iterations(20)
            .with_acceptance(AcceptancePolicy::Metropolis);
        let result = Annealer::run_seeded(&problem, &config, 1).unwrap();
        assert_eq!(result.energy_history.len(), 20);
        assert_eq!(result.iterations, 140);
    }

    #[test]
    fn test_uncapped_runs_until_min_temperature() {
        let problem = small_satisfiable();
        let config = AnnealConfig::new(10.0, 1.0, 0.5);
        let result = Annealer::run_seeded(&problem, &config, 3).unwrap();
        // 10, 5, 2.5, 1.25 are above 1.0
        assert_eq!(result.temperature_levels, 4);
        assert!(result.final_temperature <= 1.0);
    }

    #[test]
    fn test_finds_satisfying_assignment() {
        let problem = small_satisfiable();
        for policy in [AcceptancePolicy::StrictImprovement, AcceptancePolicy::Metropolis] {
            let config = classic().with_acceptance(policy);
            let result = Annealer::run_seeded(&problem, &config, 7).unwrap();
            assert_eq!(result.best_energy, 0, "{policy:?}");
            assert!(problem.is_satisfied_by(&result.best_assignment).unwrap());
        }
    }

    #[test]
    fn test_best_energy_matches_best_assignment() {
        let problem = small_satisfiable();
        let result = Annealer::run_seeded(&problem, &classic(), 11).unwrap();
        assert_eq!(
            problem.energy(&result.best_assignment).unwrap(),
            result.best_energy
        );
        let min_seen = result.energy_history.iter().copied().min().unwrap();
        assert!(result.best_energy <= min_seen);
    }

    #[test]
    fn test_no_levels_when_min_above_initial() {
        let problem = small_satisfiable();
        let config = AnnealConfig::new(1e-9, 1e-5, 0.99);

        let mut rng = create_rng(5);
        let start = Assignment::random(problem.num_variables(), &mut rng);
        let start_energy = problem.energy(&start).unwrap();

        let result = Annealer::run_seeded(&problem, &config, 5).unwrap();
        assert_eq!(result.temperature_levels, 0);
        assert!(result.energy_history.is_empty());
        assert_eq!(result.best_energy, start_energy);
        assert_eq!(result.best_assignment, start);
    }

    #[test]
    fn test_zero_variable_problem_short_circuits() {
        let empty = Problem::build(0, Vec::<Vec<i32>>::new()).unwrap();
        let result = Annealer::run_seeded(&empty, &classic(), 0).unwrap();
        assert_eq!(result.best_energy, 0);
        assert!(result.best_assignment.is_empty());
        assert!(result.energy_history.is_empty());
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let problem = small_satisfiable();
        let config = classic().with_cooling_rate(1.0);
        let err = Annealer::run_seeded(&problem, &config, 0).unwrap_err();
        assert!(matches!(err, SatError::InvalidParameter(_)));
    }

    #[test]
    fn test_high_temperature_accepts_most_moves() {
        let problem = small_satisfiable();
        let config = AnnealConfig::new(1e8, 1e7, 0.99)
            .with_iterations_per_temperature(100)
            .with_acceptance(AcceptancePolicy::Metropolis);
        let result = Annealer::run_seeded(&problem, &config, 42).unwrap();
        let ratio = result.accepted_moves as f64 / result.iterations as f64;
        assert!(ratio > 0.99, "expected near-total acceptance, got {ratio}");
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let problem = small_satisfiable();
        let a = Annealer::run_seeded(&problem, &classic(), 99).unwrap();
        let b = Annealer::run_seeded(&problem, &classic(), 99).unwrap();
        assert_eq!(a, b);
    }
}
