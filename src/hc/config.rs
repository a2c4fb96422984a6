//! HC configuration.

/// Configuration for Hill Climbing.
///
/// # Examples
///
/// ```
/// use u_metabench::hc::HcConfig;
///
/// let config = HcConfig::default()
///     .with_base_step(0.2)
///     .with_max_iterations(500)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HcConfig {
    /// Normalized step passed to the neighborhood, in `[0, 1]`.
    pub base_step: f64,

    /// Maximum number of iterations. 0 = no limit.
    pub max_iterations: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for HcConfig {
    fn default() -> Self {
        Self {
            base_step: 0.1,
            max_iterations: 0,
            seed: None,
        }
    }
}

impl HcConfig {
    pub fn with_base_step(mut self, step: f64) -> Self {
        self.base_step = step;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.base_step) {
            return Err(format!("base_step must be in [0, 1], got {}", self.base_step));
        }
        Ok(())
    }
}
