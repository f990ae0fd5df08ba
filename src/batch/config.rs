//! Batch configuration.

use crate::error::{Result, SatError};

/// Configuration for a batch of independent trajectories.
///
/// # Examples
///
/// ```
/// use sat_anneal::batch::BatchConfig;
///
/// let config = BatchConfig::new(100).with_seed(42).with_parallel(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchConfig {
    /// Number of trajectories to run.
    pub num_executions: usize,

    /// Base seed; trajectory `i` uses `base_seed ^ i`.
    /// `None` draws a base seed from OS entropy once per batch.
    pub base_seed: Option<u64>,

    /// Run trajectories on the rayon pool.
    ///
    /// Requires the `parallel` feature; otherwise the batch runs serially.
    pub parallel: bool,
}

impl BatchConfig {
    pub fn new(num_executions: usize) -> Self {
        Self {
            num_executions,
            base_seed: None,
            parallel: false,
        }
    }

    pub fn with_executions(mut self, n: usize) -> Self {
        self.num_executions = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.base_seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.num_executions == 0 {
            return Err(SatError::InvalidParameter(
                "num_executions must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
