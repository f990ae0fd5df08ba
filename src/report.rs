//! Result presentation: console summary and mean-energy curve export.

use crate::batch::AggregateResult;
use crate::error::Result;
use crate::problem::Problem;
use std::fmt;
use std::io::Write;

/// Human- and machine-readable digest of a batch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    pub num_variables: usize,
    pub num_clauses: usize,
    pub best_energy: usize,
    /// Fraction of clauses satisfied by the best assignment.
    pub satisfied_ratio: f64,
    pub best_run: usize,
    pub num_runs: usize,
    pub satisfied_runs: usize,
    pub mean_best_energy: f64,
    /// DIMACS `v` line of the best assignment.
    pub model: String,
    /// 0-based indices of clauses the best assignment violates.
    pub unsatisfied_clauses: Vec<usize>,
}

impl Summary {
    pub fn from_aggregate(problem: &Problem, aggregate: &AggregateResult) -> Result<Self> {
        let num_clauses = problem.num_clauses();
        let satisfied_ratio = if num_clauses == 0 {
            1.0
        } else {
            (num_clauses - aggregate.global_best_energy) as f64 / num_clauses as f64
        };
        Ok(Self {
            num_variables: problem.num_variables(),
            num_clauses,
            best_energy: aggregate.global_best_energy,
            satisfied_ratio,
            best_run: aggregate.best_run,
            num_runs: aggregate.num_runs(),
            satisfied_runs: aggregate.satisfied_runs,
            mean_best_energy: aggregate.mean_best_energy(),
            model: aggregate.global_best_assignment.to_dimacs_line(),
            unsatisfied_clauses: problem.unsatisfied_clauses(&aggregate.global_best_assignment)?,
        })
    }

    pub fn is_satisfying(&self) -> bool {
        self.best_energy == 0
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_satisfying() {
            "SATISFIABLE"
        } else {
            "UNKNOWN"
        };
        writeln!(f, "s {status}")?;
        writeln!(
            f,
            "c variables: {}, clauses: {}",
            self.num_variables, self.num_clauses
        )?;
        writeln!(
            f,
            "c unsatisfied clauses: {} ({:.2}% satisfied)",
            self.best_energy,
            self.satisfied_ratio * 100.0
        )?;
        writeln!(
            f,
            "c best run: {} of {}, runs reaching 0: {}, mean best energy: {:.3}",
            self.best_run + 1,
            self.num_runs,
            self.satisfied_runs,
            self.mean_best_energy
        )?;
        if !self.unsatisfied_clauses.is_empty() {
            let list: Vec<String> = self
                .unsatisfied_clauses
                .iter()
                .map(|i| (i + 1).to_string())
                .collect();
            writeln!(f, "c violated clauses (1-based): {}", list.join(" "))?;
        }
        write!(f, "{}", self.model)
    }
}

/// Writes the mean-energy curve as CSV: `level,mean_energy`.
pub fn write_curve_csv<W: Write>(mut writer: W, curve: &[f64]) -> Result<()> {
    writeln!(writer, "level,mean_energy")?;
    for (level, energy) in curve.iter().enumerate() {
        writeln!(writer, "{level},{energy}")?;
    }
    writer.flush()?;
    Ok(())
}
