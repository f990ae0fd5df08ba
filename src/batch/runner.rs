//! Batch execution.

use super::config::BatchConfig;
use super::reduce::{reduce, AggregateResult};
use crate::anneal::{AnnealConfig, Annealer, RunResult};
use crate::error::Result;
use crate::problem::Problem;
use crate::random::{create_rng, trajectory_seed};
use rand::Rng;
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Executes many independent annealing trajectories and reduces them.
pub struct BatchRunner;

impl BatchRunner {
    /// Runs `batch.num_executions` trajectories seeded `base_seed ^ i`.
    ///
    /// With a fixed base seed the result is identical for serial and
    /// parallel scheduling.
    pub fn run_many(
        problem: &Problem,
        anneal: &AnnealConfig,
        batch: &BatchConfig,
    ) -> Result<AggregateResult> {
        batch.validate()?;
        anneal.validate()?;

        let base_seed = match batch.base_seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random();
                info!(base_seed = seed, "no base seed given, drew one");
                seed
            }
        };
        let runs = Self::execute(problem, batch, |index| {
            Annealer::run_seeded(problem, anneal, trajectory_seed(base_seed, index))
        })?;
        Self::finish(runs)
    }

    /// Runs the batch with a caller-supplied generator per trajectory.
    ///
    /// `rng_factory(i)` builds the generator for trajectory `i`. It is called
    /// once per trajectory, possibly from several threads.
    pub fn run_many_with<R, F>(
        problem: &Problem,
        anneal: &AnnealConfig,
        batch: &BatchConfig,
        rng_factory: F,
    ) -> Result<AggregateResult>
    where
        R: Rng,
        F: Fn(usize) -> R + Sync,
    {
        batch.validate()?;
        anneal.validate()?;
        let runs = Self::execute(problem, batch, |index| {
            let mut rng = rng_factory(index);
            Annealer::run(problem, anneal, &mut rng)
        })?;
        Self::finish(runs)
    }

    /// Runs every trajectory and returns results in index order.
    fn execute<F>(problem: &Problem, batch: &BatchConfig, trajectory: F) -> Result<Vec<RunResult>>
    where
        F: Fn(usize) -> Result<RunResult> + Sync,
    {
        info!(
            executions = batch.num_executions,
            variables = problem.num_variables(),
            clauses = problem.num_clauses(),
            parallel = batch.parallel,
            "starting batch"
        );

        let run_one = |index: usize| -> Result<RunResult> {
            debug!(execution = index + 1, "execution started");
            let result = trajectory(index)?;
            debug!(
                execution = index + 1,
                energy = result.best_energy,
                "execution completed"
            );
            Ok(result)
        };

        if batch.parallel {
            #[cfg(feature = "parallel")]
            {
                return (0..batch.num_executions)
                    .into_par_iter()
                    .map(run_one)
                    .collect();
            }
            #[cfg(not(feature = "parallel"))]
            {
                tracing::warn!("`parallel` feature disabled, running serially");
            }
        }

        (0..batch.num_executions).map(run_one).collect()
    }

    fn finish(runs: Vec<RunResult>) -> Result<AggregateResult> {
        let aggregate = reduce(runs)?;
        info!(
            best_energy = aggregate.global_best_energy,
            best_run = aggregate.best_run + 1,
            satisfied_runs = aggregate.satisfied_runs,
            mean_best_energy = aggregate.mean_best_energy(),
            "batch finished"
        );
        Ok(aggregate)
    }
}

/// Generator factory matching [`BatchRunner::run_many`]'s seeding scheme.
pub fn seeded_factory(base_seed: u64) -> impl Fn(usize) -> crate::random::SatRng + Sync {
    move |index| create_rng(trajectory_seed(base_seed, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anneal::AcceptancePolicy;
    use crate::error::SatError;

    fn problem() -> Problem {
        Problem::build(
            5,
            [
                vec![1, -2, 3],
                vec![-1, 2, 4],
                vec![2, -4, 5],
                vec![-3, -5, 1],
                vec![-1, -2, -5],
                vec![3, 4, -5],
            ],
        )
        .unwrap()
    }

    fn anneal() -> AnnealConfig {
        AnnealConfig::new(100.0, 1e-3, 0.95).with_max_iterations(200)
    }

    #[test]
    fn test_run_many_reproducible() {
        let batch = BatchConfig::new(8).with_seed(42);
        let a = BatchRunner::run_many(&problem(), &anneal(), &batch).unwrap();
        let b = BatchRunner::run_many(&problem(), &anneal(), &batch).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.num_runs(), 8);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let serial = BatchConfig::new(8).with_seed(7);
        let parallel = serial.clone().with_parallel(true);
        let a = BatchRunner::run_many(&problem(), &anneal(), &serial).unwrap();
        let b = BatchRunner::run_many(&problem(), &anneal(), &parallel).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_run_many_with_seeded_factory_matches_run_many() {
        let batch = BatchConfig::new(4).with_seed(3);
        let a = BatchRunner::run_many(&problem(), &anneal(), &batch).unwrap();
        let b =
            BatchRunner::run_many_with(&problem(), &anneal(), &batch, seeded_factory(3)).unwrap();
        assert_eq!(a.global_best_energy, b.global_best_energy);
        assert_eq!(a.mean_energy_curve, b.mean_energy_curve);
        assert_eq!(a.run_best_energies, b.run_best_energies);
    }

    #[test]
    fn test_trajectory_seeds_recorded() {
        let batch = BatchConfig::new(3).with_seed(100);
        let agg = BatchRunner::run_many(&problem(), &anneal(), &batch).unwrap();
        let seeds: Vec<_> = agg.runs.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![Some(100), Some(101), Some(102)]);
    }

    #[test]
    fn test_curve_length_and_best() {
        let batch = BatchConfig::new(5).with_seed(1);
        let config = anneal().with_acceptance(AcceptancePolicy::Metropolis);
        let agg = BatchRunner::run_many(&problem(), &config, &batch).unwrap();
        assert_eq!(agg.mean_energy_curve.len(), 200);
        assert_eq!(
            agg.global_best_energy,
            *agg.run_best_energies.iter().min().unwrap()
        );
        assert_eq!(
            problem().energy(&agg.global_best_assignment).unwrap(),
            agg.global_best_energy
        );
    }

    #[test]
    fn test_zero_executions_rejected() {
        let err = BatchRunner::run_many(&problem(), &anneal(), &BatchConfig::new(0)).unwrap_err();
        assert!(matches!(err, SatError::InvalidParameter(_)));
    }

    #[test]
    fn test_invalid_anneal_rejected_before_running() {
        let batch = BatchConfig::new(2).with_seed(0);
        let config = anneal().with_cooling_rate(0.0);
        let err = BatchRunner::run_many(&problem(), &config, &batch).unwrap_err();
        assert!(matches!(err, SatError::InvalidParameter(_)));
    }
}
