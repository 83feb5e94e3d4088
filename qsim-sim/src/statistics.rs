//! Execution statistics tracking

use std::time::Duration;

use crate::program::ExecutionPath;

/// Execution statistics for a simulation run
#[derive(Debug, Clone, Default)]
pub struct ExecutionStatistics {
    /// Total execution time
    pub total_time: Duration,

    /// Time spent compiling the circuit to operators
    pub compilation_time: Duration,

    /// Time spent evolving states (all trajectories, or the single pure run)
    pub evolution_time: Duration,

    /// Time spent drawing shots in the deferred path
    pub sampling_time: Duration,

    /// Path chosen for the run
    pub path: Option<ExecutionPath>,

    /// Number of unitary steps in the compiled program
    pub gates_compiled: usize,

    /// Unitary steps whose operator fit in the cache
    pub operators_cached: usize,

    /// Records passed over as unsupported
    pub unsupported_skipped: usize,

    /// Number of full runs of the program
    pub trajectories: usize,

    /// Shots that produced a register string
    pub shots_recorded: usize,

    /// Shots dropped because nothing was measured
    pub shots_dropped: usize,

    /// Peak memory usage (estimated, in bytes)
    pub peak_memory_bytes: usize,
}

impl ExecutionStatistics {
    /// Create a new statistics object
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimated footprint of `operators` dense operators plus one state vector
    ///
    /// Every operator is a `2^n × 2^n` complex matrix.
    pub fn estimate_memory(num_qubits: usize, operators: usize) -> usize {
        let dim = 1usize << num_qubits;
        let amplitude = std::mem::size_of::<num_complex::Complex64>();
        operators * dim * dim * amplitude + dim * amplitude
    }

    /// Shot throughput over the whole run
    pub fn shots_per_second(&self) -> f64 {
        let secs = self.total_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            (self.shots_recorded + self.shots_dropped) as f64 / secs
        }
    }

    /// Get the compilation overhead as a percentage of total time
    pub fn compilation_overhead_percent(&self) -> f64 {
        let total_secs = self.total_time.as_secs_f64();
        if total_secs == 0.0 {
            0.0
        } else {
            100.0 * self.compilation_time.as_secs_f64() / total_secs
        }
    }

    /// Get peak memory usage in MB
    pub fn peak_memory_mb(&self) -> f64 {
        self.peak_memory_bytes as f64 / 1_000_000.0
    }
}

impl std::fmt::Display for ExecutionStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Execution Statistics:")?;
        if let Some(path) = self.path {
            writeln!(f, "  Path: {}", path)?;
        }
        writeln!(f, "  Total time: {:?}", self.total_time)?;
        writeln!(
            f,
            "    Compilation: {:?} ({:.1}%)",
            self.compilation_time,
            self.compilation_overhead_percent()
        )?;
        writeln!(f, "    Evolution: {:?}", self.evolution_time)?;
        writeln!(f, "    Sampling: {:?}", self.sampling_time)?;

        writeln!(f, "\n  Program:")?;
        writeln!(f, "    Gates: {}", self.gates_compiled)?;
        writeln!(f, "    Cached operators: {}", self.operators_cached)?;
        writeln!(f, "    Unsupported (skipped): {}", self.unsupported_skipped)?;

        writeln!(f, "\n  Shots:")?;
        writeln!(f, "    Trajectories: {}", self.trajectories)?;
        writeln!(f, "    Recorded: {}", self.shots_recorded)?;
        writeln!(f, "    Dropped: {}", self.shots_dropped)?;
        writeln!(f, "    Throughput: {:.0} shots/sec", self.shots_per_second())?;

        writeln!(f, "\n  Memory:")?;
        writeln!(f, "    Peak usage: {:.2} MB", self.peak_memory_mb())?;

        Ok(())
    }
}
