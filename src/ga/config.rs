//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

/// How offspring genes are perturbed.
///
/// The choice decides whether duplicate columns can ever appear: swapping
/// keeps a permutation a permutation, reassigning does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationPolicy {
    /// Swap the gene with another random gene.
    #[default]
    Swap,
    /// Replace the gene with a uniformly random column.
    Reassign,
}

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use nqueens_bench::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 500);
/// assert_eq!(config.max_generations, 5000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use nqueens_bench::ga::{GaConfig, MutationPolicy};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_elite_count(5)
///     .with_mutation_rate(0.05)
///     .with_mutation_policy(MutationPolicy::Reassign);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Maximum number of populations evaluated, the initial one included.
    pub max_generations: usize,

    /// Top individuals copied unchanged into the next generation.
    pub elite_count: usize,

    /// Parents are drawn uniformly (with replacement) from this many of the
    /// fittest individuals. Clamped to the population size.
    pub parent_pool: usize,

    /// Per-gene mutation probability (0.0–1.0).
    pub mutation_rate: f64,

    /// Mutation operator.
    pub mutation_policy: MutationPolicy,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 500,
            max_generations: 5000,
            elite_count: 10,
            parent_pool: 50,
            mutation_rate: 0.1,
            mutation_policy: MutationPolicy::Swap,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_count(mut self, k: usize) -> Self {
        self.elite_count = k;
        self
    }

    /// Sets the size of the parent pool.
    pub fn with_parent_pool(mut self, k: usize) -> Self {
        self.parent_pool = k;
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation operator.
    pub fn with_mutation_policy(mut self, policy: MutationPolicy) -> Self {
        self.mutation_policy = policy;
        self
    }

    /// Preset for quick runs on small boards.
    ///
    /// - Population: 100, Generations: 1000, Elites: 5, Parent pool: 20
    pub fn fast() -> Self {
        Self {
            population_size: 100,
            max_generations: 1000,
            elite_count: 5,
            parent_pool: 20,
            ..Self::default()
        }
    }

    /// Preset for large boards: bigger population and generation budget.
    ///
    /// - Population: 1000, Generations: 10000, Elites: 20, Parent pool: 100
    pub fn thorough() -> Self {
        Self {
            population_size: 1000,
            max_generations: 10_000,
            elite_count: 20,
            parent_pool: 100,
            ..Self::default()
        }
    }

    /// Selects a preset based on board size.
    ///
    /// - `n < 20` → [`fast()`](Self::fast)
    /// - `20 ≤ n < 100` → [`default()`](Self::default)
    /// - `n ≥ 100` → [`thorough()`](Self::thorough)
    pub fn auto_select(n: usize) -> Self {
        if n < 20 {
            Self::fast()
        } else if n < 100 {
            Self::default()
        } else {
            Self::thorough()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if self.elite_count >= self.population_size {
            return Err("elite_count too high: elites fill entire population".into());
        }
        if self.parent_pool == 0 {
            return Err("parent_pool must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 500);
        assert_eq!(config.max_generations, 5000);
        assert_eq!(config.elite_count, 10);
        assert_eq!(config.parent_pool, 50);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
        assert_eq!(config.mutation_policy, MutationPolicy::Swap);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(60)
            .with_max_generations(10)
            .with_elite_count(2)
            .with_parent_pool(8)
            .with_mutation_rate(0.3)
            .with_mutation_policy(MutationPolicy::Reassign);

        assert_eq!(config.population_size, 60);
        assert_eq!(config.max_generations, 10);
        assert_eq!(config.elite_count, 2);
        assert_eq!(config.parent_pool, 8);
        assert!((config.mutation_rate - 0.3).abs() < 1e-10);
        assert_eq!(config.mutation_policy, MutationPolicy::Reassign);
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = GaConfig::default().with_population_size(1).with_elite_count(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        assert!(GaConfig::default().with_max_generations(0).validate().is_err());
    }

    #[test]
    fn test_validate_elite_too_high() {
        let config = GaConfig::default()
            .with_population_size(10)
            .with_elite_count(10);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_parent_pool() {
        assert!(GaConfig::default().with_parent_pool(0).validate().is_err());
    }

    #[test]
    fn test_mutation_rate_clamped() {
        assert!((GaConfig::default().with_mutation_rate(2.0).mutation_rate - 1.0).abs() < 1e-10);
        assert!(GaConfig::default().with_mutation_rate(-1.0).mutation_rate.abs() < 1e-10);
    }

    #[test]
    fn test_presets_valid() {
        assert!(GaConfig::fast().validate().is_ok());
        assert!(GaConfig::thorough().validate().is_ok());
    }

    #[test]
    fn test_auto_select_boundaries() {
        assert_eq!(GaConfig::auto_select(19), GaConfig::fast());
        assert_eq!(GaConfig::auto_select(20), GaConfig::default());
        assert_eq!(GaConfig::auto_select(99), GaConfig::default());
        assert_eq!(GaConfig::auto_select(100), GaConfig::thorough());
    }
}
