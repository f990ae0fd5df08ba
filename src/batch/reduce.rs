//! Reduction of trajectory results.

use crate::anneal::RunResult;
use crate::assignment::Assignment;
use crate::error::{Result, SatError};

/// Combined outcome of a batch of trajectories.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregateResult {
    /// Best assignment across all trajectories.
    pub global_best_assignment: Assignment,

    /// Energy of `global_best_assignment`.
    pub global_best_energy: usize,

    /// Coordinate-wise mean of the right-padded energy histories.
    pub mean_energy_curve: Vec<f64>,

    /// Index of the trajectory that produced the global best.
    pub best_run: usize,

    /// Best energy of each trajectory, in execution order.
    pub run_best_energies: Vec<usize>,

    /// Trajectories that reached energy 0.
    pub satisfied_runs: usize,

    /// Raw per-trajectory results, in execution order.
    pub runs: Vec<RunResult>,
}

impl AggregateResult {
    pub fn num_runs(&self) -> usize {
        self.runs.len()
    }

    /// Mean of the per-trajectory best energies.
    pub fn mean_best_energy(&self) -> f64 {
        if self.run_best_energies.is_empty() {
            return 0.0;
        }
        self.run_best_energies.iter().sum::<usize>() as f64 / self.run_best_energies.len() as f64
    }
}

/// Reduces trajectory results, given in execution order.
///
/// The global best is the first trajectory with the lowest `best_energy`.
/// A trajectory with an empty history (zero-variable problem) contributes
/// its `best_energy` at every level of the mean curve.
///
/// # Errors
/// [`SatError::InvalidParameter`] if `runs` is empty.
pub fn reduce(runs: Vec<RunResult>) -> Result<AggregateResult> {
    let (best_run, best) = runs
        .iter()
        .enumerate()
        .min_by_key(|(i, r)| (r.best_energy, *i))
        .ok_or_else(|| SatError::InvalidParameter("cannot reduce zero runs".into()))?;

    let series: Vec<(&[usize], usize)> = runs
        .iter()
        .map(|r| {
            let fill = r.energy_history.last().copied().unwrap_or(r.best_energy);
            (r.energy_history.as_slice(), fill)
        })
        .collect();
    let len = series.iter().map(|(h, _)| h.len()).max().unwrap_or(0);

    Ok(AggregateResult {
        global_best_assignment: best.best_assignment.clone(),
        global_best_energy: best.best_energy,
        mean_energy_curve: mean_of_padded(&series, len),
        best_run,
        run_best_energies: runs.iter().map(|r| r.best_energy).collect(),
        satisfied_runs: runs.iter().filter(|r| r.is_satisfying()).count(),
        runs,
    })
}

/// Right-pads each history with its last value to the longest length,
/// then averages coordinate-wise.
///
/// Empty histories have no value to pad with and are left out.
///
/// ```
/// use sat_anneal::batch::align_mean_curve;
///
/// let curve = align_mean_curve(&[vec![5, 3, 2], vec![4, 3, 2, 1, 1]]);
/// assert_eq!(curve, vec![4.5, 3.0, 2.0, 1.5, 1.5]);
/// ```
pub fn align_mean_curve(histories: &[Vec<usize>]) -> Vec<f64> {
    let series: Vec<(&[usize], usize)> = histories
        .iter()
        .filter_map(|h| h.last().map(|&last| (h.as_slice(), last)))
        .collect();
    let len = series.iter().map(|(h, _)| h.len()).max().unwrap_or(0);
    mean_of_padded(&series, len)
}

fn mean_of_padded(series: &[(&[usize], usize)], len: usize) -> Vec<f64> {
    if series.is_empty() {
        return Vec::new();
    }
    let mut sums = vec![0usize; len];
    for (history, fill) in series {
        for (level, sum) in sums.iter_mut().enumerate() {
            *sum += history.get(level).copied().unwrap_or(*fill);
        }
    }
    let n = series.len() as f64;
    sums.into_iter().map(|s| s as f64 / n).collect()
}
