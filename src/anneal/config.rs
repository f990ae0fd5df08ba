//! Annealing configuration and acceptance policies.

use crate::error::{Result, SatError};

/// Rule deciding whether a proposed neighbor replaces the current state.
///
/// Both accept strictly improving moves outright and accept worsening moves
/// with probability `exp(-delta / T)`. They differ in how an equal-energy
/// move is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AcceptancePolicy {
    /// Deterministic accept only when `neighbor < current`.
    ///
    /// Every other move, ties included, goes through a uniform draw
    /// compared with `exp(-delta / T)`.
    StrictImprovement,

    /// Canonical Metropolis criterion: deterministic accept when
    /// `delta <= 0`, a draw only for worsening moves.
    Metropolis,
}

impl AcceptancePolicy {
    /// Whether the decision for `delta` needs a random draw.
    pub fn needs_draw(self, delta: i64) -> bool {
        match self {
            AcceptancePolicy::StrictImprovement => delta >= 0,
            AcceptancePolicy::Metropolis => delta > 0,
        }
    }

    /// Decides acceptance of a move with energy change `delta` at
    /// `temperature`. `draw` is only invoked when [`needs_draw`](Self::needs_draw).
    pub fn accepts<F: FnOnce() -> f64>(self, delta: i64, temperature: f64, draw: F) -> bool {
        if !self.needs_draw(delta) {
            return true;
        }
        let probability = (-(delta as f64) / temperature).exp();
        draw() < probability
    }
}

/// Configuration for one annealing trajectory.
///
/// There are no defaults at this layer; the caller chooses every value.
///
/// # Examples
///
/// ```
/// use sat_anneal::anneal::{AcceptancePolicy, AnnealConfig};
///
/// let config = AnnealConfig::new(1000.0, 1e-5, 0.99)
///     .with_iterations_per_temperature(50)
///     .with_max_iterations(2000)
///     .with_acceptance(AcceptancePolicy::Metropolis);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealConfig {
    /// Starting temperature.
    pub initial_temperature: f64,

    /// The loop stops once the temperature is at or below this.
    pub min_temperature: f64,

    /// Geometric factor `T_{k+1} = alpha * T_k`, in (0, 1).
    pub cooling_rate: f64,

    /// Perturbation attempts per temperature level.
    pub iterations_per_temperature: usize,

    /// Cap on temperature levels. `None` = run until `min_temperature`.
    pub max_iterations: Option<usize>,

    pub acceptance: AcceptancePolicy,
}

impl AnnealConfig {
    /// One attempt per level, no level cap, strict-improvement acceptance.
    pub fn new(initial_temperature: f64, min_temperature: f64, cooling_rate: f64) -> Self {
        Self {
            initial_temperature,
            min_temperature,
            cooling_rate,
            iterations_per_temperature: 1,
            max_iterations: None,
            acceptance: AcceptancePolicy::StrictImprovement,
        }
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, alpha: f64) -> Self {
        self.cooling_rate = alpha;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    pub fn without_max_iterations(mut self) -> Self {
        self.max_iterations = None;
        self
    }

    pub fn with_acceptance(mut self, policy: AcceptancePolicy) -> Self {
        self.acceptance = policy;
        self
    }

    /// Upper bound on the number of temperature levels this config runs.
    pub fn expected_levels(&self) -> usize {
        if self.initial_temperature <= self.min_temperature {
            return 0;
        }
        let by_temperature = ((self.min_temperature / self.initial_temperature).ln()
            / self.cooling_rate.ln())
        .ceil()
        .max(0.0) as usize;
        match self.max_iterations {
            Some(cap) => by_temperature.min(cap),
            None => by_temperature,
        }
    }

    /// Validates the configuration.
    ///
    /// `min_temperature >= initial_temperature` is accepted and yields a
    /// trajectory with zero cooling levels.
    pub fn validate(&self) -> Result<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(SatError::InvalidParameter(format!(
                "initial_temperature must be positive, got {}",
                self.initial_temperature
            )));
        }
        if !self.min_temperature.is_finite() || self.min_temperature <= 0.0 {
            return Err(SatError::InvalidParameter(format!(
                "min_temperature must be positive, got {}",
                self.min_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(SatError::InvalidParameter(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if self.iterations_per_temperature == 0 {
            return Err(SatError::InvalidParameter(
                "iterations_per_temperature must be at least 1".into(),
            ));
        }
        if self.max_iterations == Some(0) {
            return Err(SatError::InvalidParameter(
                "max_iterations must be at least 1 when set".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> AnnealConfig {
        AnnealConfig::new(1000.0, 1e-5, 0.99)
    }

    #[test]
    fn test_validate_ok() {
        assert!(base().validate().is_ok());
        assert!(base().with_max_iterations(1000).validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        assert!(base().with_initial_temperature(-1.0).validate().is_err());
        assert!(base().with_initial_temperature(0.0).validate().is_err());
        assert!(base().with_min_temperature(0.0).validate().is_err());
        assert!(base().with_initial_temperature(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_min_ge_initial_is_allowed() {
        let config = base().with_initial_temperature(1.0).with_min_temperature(2.0);
        assert!(config.validate().is_ok());
        assert_eq!(config.expected_levels(), 0);
    }

    #[test]
    fn test_validate_bad_cooling_rate() {
        for alpha in [0.0, 1.0, 1.5, -0.2, f64::NAN] {
            let err = base().with_cooling_rate(alpha).validate().unwrap_err();
            assert!(matches!(err, SatError::InvalidParameter(_)), "alpha {alpha}");
        }
    }

    #[test]
    fn test_validate_zero_counts() {
        assert!(base().with_iterations_per_temperature(0).validate().is_err());
        assert!(base().with_max_iterations(0).validate().is_err());
    }

    #[test]
    fn test_expected_levels() {
        // 1000 * 0.99^k <= 1e-5  =>  k = ceil(ln(1e-8) / ln(0.99)) = 1833
        assert_eq!(base().expected_levels(), 1833);
        assert_eq!(base().with_max_iterations(1000).expected_levels(), 1000);
    }

    #[test]
    fn test_policies_on_improvement() {
        for policy in [AcceptancePolicy::StrictImprovement, AcceptancePolicy::Metropolis] {
            assert!(policy.accepts(-1, 1.0, || panic!("no draw expected")));
        }
    }

    #[test]
    fn test_policies_on_tie() {
        assert!(AcceptancePolicy::Metropolis.accepts(0, 1.0, || panic!("no draw expected")));
        let mut drawn = false;
        let accepted = AcceptancePolicy::StrictImprovement.accepts(0, 1.0, || {
            drawn = true;
            0.999
        });
        assert!(drawn);
        assert!(accepted);
    }

    #[test]
    fn test_policies_on_worsening() {
        for policy in [AcceptancePolicy::StrictImprovement, AcceptancePolicy::Metropolis] {
            // exp(-1 / 1) ~= 0.368
            assert!(policy.accepts(1, 1.0, || 0.3));
            assert!(!policy.accepts(1, 1.0, || 0.4));
            // Frozen: essentially never accepted.
            assert!(!policy.accepts(1, 1e-9, || 0.0));
        }
    }
}
