//! Backtracking configuration.

/// Configuration for exhaustive backtracking.
///
/// # Examples
///
/// ```
/// use nqueens_bench::backtrack::BacktrackConfig;
///
/// let config = BacktrackConfig::default().with_node_limit(1_000_000);
/// assert_eq!(config.node_limit, 1_000_000);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BacktrackConfig {
    /// Maximum attempted placements before giving up. 0 = no limit.
    pub node_limit: u64,
}

impl BacktrackConfig {
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = limit;
        self
    }

    /// Validates the configuration.
    ///
    /// Every `node_limit` is valid (0 disables the limit), so this always
    /// succeeds. It exists so every strategy config is checked the same way.
    pub fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}
