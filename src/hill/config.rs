//! Hill climbing configuration.

/// Configuration for restarting hill climbing.
///
/// # Examples
///
/// ```
/// use nqueens_bench::hill::HillConfig;
///
/// let config = HillConfig::default()
///     .with_max_restarts(5)
///     .with_max_sideways(20);
/// assert_eq!(config.max_restarts, 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HillConfig {
    /// Restarts allowed after the first climb.
    pub max_restarts: usize,

    /// Neighbourhood evaluations allowed per climb.
    pub max_steps: usize,

    /// Consecutive sideways moves allowed before a plateau counts as a
    /// local minimum.
    pub max_sideways: usize,

    /// Whether equal-cost moves are taken at all.
    pub allow_sideways: bool,
}

impl Default for HillConfig {
    fn default() -> Self {
        Self {
            max_restarts: 50,
            max_steps: 1000,
            max_sideways: 100,
            allow_sideways: true,
        }
    }
}

impl HillConfig {
    pub fn with_max_restarts(mut self, n: usize) -> Self {
        self.max_restarts = n;
        self
    }

    pub fn with_max_steps(mut self, n: usize) -> Self {
        self.max_steps = n;
        self
    }

    pub fn with_max_sideways(mut self, n: usize) -> Self {
        self.max_sideways = n;
        self
    }

    pub fn with_sideways(mut self, allow: bool) -> Self {
        self.allow_sideways = allow;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_steps == 0 {
            return Err("max_steps must be at least 1".into());
        }
        Ok(())
    }
}
