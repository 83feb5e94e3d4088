//! Simulator configuration

use serde::{Deserialize, Serialize};

use crate::statistics::ExecutionStatistics;

/// Hard ceiling on `max_qubits`; a single dense 2^n × 2^n operator past this is over 1 GB
pub const QUBIT_CEILING: usize = 13;

/// Dense operators alive at once while one gate is built and applied
///
/// Two-qubit gates are assembled from products of full-system operators.
pub const OPERATOR_WORKSPACE: usize = 4;

/// Configuration for the quantum simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Number of shots for sampled runs
    ///
    /// Default: 1024
    pub shots: usize,

    /// Random number generator seed for reproducibility
    ///
    /// If None, the master generator is seeded from entropy. Set to Some(seed)
    /// for deterministic counts.
    ///
    /// Default: None (random)
    pub seed: Option<u64>,

    /// Measure every qubit into the classical bit of the same index when the
    /// circuit declares no measurements
    ///
    /// When false, such circuits return their final state vector instead of
    /// counts.
    ///
    /// Default: true
    pub auto_measure: bool,

    /// Sample terminal measurements from a single pure run
    ///
    /// When false, every shot runs its own trajectory even if no measurement
    /// is followed by a gate.
    ///
    /// Default: true
    pub deferred_sampling: bool,

    /// Spread shots across the rayon thread pool
    ///
    /// Default: true
    pub parallel: bool,

    /// Minimum number of shots before work is parallelized
    ///
    /// Smaller runs stay single-threaded to avoid scheduling overhead.
    ///
    /// Default: 64
    pub parallel_threshold: usize,

    /// Largest register the simulator accepts
    ///
    /// Checked before any state or operator is allocated. Must not exceed
    /// [`QUBIT_CEILING`]. The effective limit may be lower, see
    /// [`SimulatorConfig::qubit_limit`].
    ///
    /// Default: 10
    pub max_qubits: usize,

    /// Memory budget in bytes for dense operators and the state vector
    ///
    /// A register whose working set (see [`OPERATOR_WORKSPACE`]) exceeds this
    /// is rejected before compilation. Whatever is left over caches compiled
    /// operators; gates past the cache are rebuilt each time they are applied.
    ///
    /// Default: 1 GiB
    pub memory_limit: usize,

    /// Enable execution statistics collection
    ///
    /// Default: false
    pub collect_statistics: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            shots: 1024,
            seed: None,
            auto_measure: true,
            deferred_sampling: true,
            parallel: true,
            parallel_threshold: 64,
            max_qubits: 10,
            memory_limit: 1 << 30,
            collect_statistics: false,
        }
    }
}

impl SimulatorConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration for debugging
    ///
    /// - Single-threaded
    /// - Statistics collection
    /// - Deterministic seed
    pub fn debug() -> Self {
        Self {
            parallel: false,
            collect_statistics: true,
            seed: Some(42),
            ..Default::default()
        }
    }

    /// Create a configuration that runs every shot as its own trajectory
    ///
    /// Useful for cross-checking the deferred sampling path.
    pub fn trajectories() -> Self {
        Self {
            deferred_sampling: false,
            ..Default::default()
        }
    }

    /// Set the number of shots
    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    /// Set the random seed for deterministic execution
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_auto_measure(mut self, enabled: bool) -> Self {
        self.auto_measure = enabled;
        self
    }

    pub fn with_deferred_sampling(mut self, enabled: bool) -> Self {
        self.deferred_sampling = enabled;
        self
    }

    /// Enable or disable parallel shot execution
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set the memory budget in bytes
    pub fn with_memory_limit(mut self, limit: usize) -> Self {
        self.memory_limit = limit;
        self
    }

    /// Enable statistics collection
    pub fn with_statistics(mut self, enabled: bool) -> Self {
        self.collect_statistics = enabled;
        self
    }

    /// Whether a run of `shots` shots should use the thread pool
    pub fn use_parallel(&self, shots: usize) -> bool {
        self.parallel && shots >= self.parallel_threshold
    }

    /// Widest register whose working set fits in `memory_limit`
    pub fn max_qubits_for_memory(&self) -> usize {
        (1..=QUBIT_CEILING)
            .take_while(|&n| {
                ExecutionStatistics::estimate_memory(n, OPERATOR_WORKSPACE) <= self.memory_limit
            })
            .last()
            .unwrap_or(0)
    }

    /// Widest register a run accepts: `max_qubits` capped by the memory budget
    pub fn qubit_limit(&self) -> usize {
        self.max_qubits.min(self.max_qubits_for_memory())
    }

    /// Bytes left for caching compiled operators of a `num_qubits` register
    pub fn operator_cache_budget(&self, num_qubits: usize) -> usize {
        let workspace = ExecutionStatistics::estimate_memory(num_qubits, OPERATOR_WORKSPACE);
        self.memory_limit.saturating_sub(workspace)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.shots == 0 {
            return Err("shots must be > 0".to_string());
        }

        if self.max_qubits == 0 || self.max_qubits > QUBIT_CEILING {
            return Err(format!(
                "max_qubits must be in [1, {}], got {}",
                QUBIT_CEILING, self.max_qubits
            ));
        }

        if self.max_qubits_for_memory() == 0 {
            return Err(format!(
                "memory_limit of {} bytes cannot hold a 1-qubit register",
                self.memory_limit
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
        let config = SimulatorConfig::default();
        assert_eq!(config.shots, 1024);
        assert_eq!(config.parallel_threshold, 64);
        assert_eq!(config.max_qubits, 10);
        assert_eq!(config.memory_limit, 1 << 30);
        assert!(config.auto_measure);
        assert!(config.deferred_sampling);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_debug_config() {
        let config = SimulatorConfig::debug();
        assert!(!config.parallel);
        assert!(config.collect_statistics);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_builder_pattern() {
        let config = SimulatorConfig::new()
            .with_shots(2048)
            .with_seed(7)
            .with_auto_measure(false)
            .with_max_qubits(12);

        assert_eq!(config.shots, 2048);
        assert_eq!(config.seed, Some(7));
        assert!(!config.auto_measure);
        assert_eq!(config.max_qubits, 12);
    }

    #[test]
    fn test_use_parallel() {
        let config = SimulatorConfig::default();
        assert!(config.use_parallel(64));
        assert!(!config.use_parallel(63));
        assert!(!config.with_parallel(false).use_parallel(10_000));
    }

    #[test]
    fn test_validate() {
        assert!(SimulatorConfig::default().validate().is_ok());

        let invalid = SimulatorConfig {
            shots: 0,
            ..Default::default()
        };
        assert!(invalid.validate().is_err());

        let invalid = SimulatorConfig::default().with_max_qubits(QUBIT_CEILING + 1);
        assert!(invalid.validate().is_err());

        let invalid = SimulatorConfig::default().with_memory_limit(64);
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_memory_caps_qubit_limit() {
        let config = SimulatorConfig::default();
        // 4 operators of 4^11 entries fit in 1 GiB; 4^12 entries leave no room for the state
        assert_eq!(config.max_qubits_for_memory(), 11);
        assert_eq!(config.qubit_limit(), 10);
        assert_eq!(config.clone().with_max_qubits(QUBIT_CEILING).qubit_limit(), 11);

        let budget = ExecutionStatistics::estimate_memory(3, OPERATOR_WORKSPACE);
        let small = config.with_memory_limit(budget);
        assert_eq!(small.qubit_limit(), 3);
        assert_eq!(small.operator_cache_budget(3), 0);
        assert!(small.operator_cache_budget(2) > 0);
    }

    #[test]
    fn test_partial_json() {
        let config: SimulatorConfig = serde_json::from_str(r#"{"shots": 10, "seed": 3}"#).unwrap();
        assert_eq!(config.shots, 10);
        assert_eq!(config.seed, Some(3));
        assert!(config.auto_measure);
    }
}
