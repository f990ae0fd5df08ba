//! Front-end settings with the solver's default parameter values.
//!
//! The engine and orchestrator take every parameter explicitly; this is the
//! one place defaults live. Values follow the classic single-flip schedule:
//! `T0 = 1000`, `T_min = 1e-5`, `alpha = 0.99`, one attempt per level, at most
//! 1000 levels, 1000 executions.

use crate::anneal::{AcceptancePolicy, AnnealConfig};
use crate::batch::BatchConfig;
use crate::error::Result;

/// Everything a front end can configure.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SolverSettings {
    pub initial_temp: f64,
    pub min_temp: f64,
    pub cooling_rate: f64,
    /// Attempts per temperature level.
    pub sa_max: usize,
    /// Cap on temperature levels; `None` cools all the way to `min_temp`.
    pub max_iterations: Option<usize>,
    pub num_executions: usize,
    pub acceptance_policy: AcceptancePolicy,
    /// Keep only clauses of this length (3 for 3-SAT).
    pub clause_arity_filter: Option<usize>,
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            initial_temp: 1000.0,
            min_temp: 1e-5,
            cooling_rate: 0.99,
            sa_max: 1,
            max_iterations: Some(1000),
            num_executions: 1000,
            acceptance_policy: AcceptancePolicy::StrictImprovement,
            clause_arity_filter: None,
            seed: None,
            parallel: false,
        }
    }
}

impl SolverSettings {
    pub fn anneal_config(&self) -> AnnealConfig {
        AnnealConfig {
            initial_temperature: self.initial_temp,
            min_temperature: self.min_temp,
            cooling_rate: self.cooling_rate,
            iterations_per_temperature: self.sa_max,
            max_iterations: self.max_iterations,
            acceptance: self.acceptance_policy,
        }
    }

    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            num_executions: self.num_executions,
            base_seed: self.seed,
            parallel: self.parallel,
        }
    }

    /// Validates both derived configurations.
    pub fn validate(&self) -> Result<()> {
        self.anneal_config().validate()?;
        self.batch_config().validate()
    }

    #[cfg(feature = "serde")]
    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = SolverSettings::default();
        assert!(settings.validate().is_ok());
        let anneal = settings.anneal_config();
        assert_eq!(anneal.iterations_per_temperature, 1);
        assert_eq!(anneal.max_iterations, Some(1000));
        assert_eq!(settings.batch_config().num_executions, 1000);
    }

    #[test]
    fn test_invalid_settings() {
        let settings = SolverSettings {
            num_executions: 0,
            ..SolverSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = SolverSettings::from_json_str(
            r#"{ "sa_max": 50, "acceptance_policy": "metropolis", "max_iterations": null }"#,
        )
        .unwrap();
        assert_eq!(settings.sa_max, 50);
        assert_eq!(settings.acceptance_policy, AcceptancePolicy::Metropolis);
        assert_eq!(settings.max_iterations, None);
        assert_eq!(settings.num_executions, 1000);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_unknown_json_field_rejected() {
        assert!(SolverSettings::from_json_str(r#"{ "temperature": 5 }"#).is_err());
    }
}
