//! Simulation result types

use qsim_core::Ket;
use std::collections::HashMap;
use std::fmt;

use crate::program::ExecutionPath;
use crate::statistics::ExecutionStatistics;

/// What a run produced
#[derive(Debug, Clone)]
pub enum SimulationOutcome {
    /// Final state of a circuit with no measurements
    StateVector(Ket),

    /// Classical register histogram
    Counts(MeasurementCounts),
}

/// Result of a quantum circuit simulation
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub outcome: SimulationOutcome,

    /// Shots requested for the run
    pub shots: usize,

    pub num_qubits: usize,

    /// Path the dispatcher chose
    pub path: ExecutionPath,

    /// Execution statistics (if statistics collection was enabled)
    pub statistics: Option<ExecutionStatistics>,
}

impl SimulationResult {
    /// Add execution statistics to the result
    pub fn with_statistics(mut self, stats: ExecutionStatistics) -> Self {
        self.statistics = Some(stats);
        self
    }

    /// Final state vector, if the run returned one
    pub fn state_vector(&self) -> Option<&Ket> {
        match &self.outcome {
            SimulationOutcome::StateVector(state) => Some(state),
            SimulationOutcome::Counts(_) => None,
        }
    }

    /// Measurement counts, if the run sampled
    pub fn counts(&self) -> Option<&MeasurementCounts> {
        match &self.outcome {
            SimulationOutcome::Counts(counts) => Some(counts),
            SimulationOutcome::StateVector(_) => None,
        }
    }

    /// Number of shots that produced a register string
    pub fn recorded_shots(&self) -> Option<usize> {
        self.counts().map(|c| c.total_shots())
    }
}

/// Measurement outcome counts
///
/// Maps classical register strings (highest bit first) to the number of
/// shots that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementCounts {
    /// Map from bitstring to count
    counts: HashMap<String, usize>,
    /// Total number of shots
    total_shots: usize,
}

impl MeasurementCounts {
    /// Create from a counts map
    pub fn from_counts(counts: HashMap<String, usize>) -> Self {
        let total_shots = counts.values().sum();
        Self {
            counts,
            total_shots,
        }
    }

    /// Get the count for a specific bitstring
    pub fn get(&self, bitstring: &str) -> usize {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Get the probability of a specific bitstring
    pub fn probability(&self, bitstring: &str) -> f64 {
        if self.total_shots == 0 {
            0.0
        } else {
            self.get(bitstring) as f64 / self.total_shots as f64
        }
    }

    /// Get total number of shots
    pub fn total_shots(&self) -> usize {
        self.total_shots
    }

    /// Get number of unique outcomes observed
    pub fn num_outcomes(&self) -> usize {
        self.counts.len()
    }

    /// Get the most common outcome
    ///
    /// Ties go to the lexicographically smallest bitstring.
    pub fn most_common(&self) -> Option<(&String, usize)> {
        self.sorted().into_iter().next()
    }

    /// Get outcomes sorted by frequency (descending)
    pub fn sorted(&self) -> Vec<(&String, usize)> {
        let mut sorted: Vec<_> = self.counts.iter().map(|(bs, &count)| (bs, count)).collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        sorted
    }

    /// Consume into the underlying map
    pub fn into_counts(self) -> HashMap<String, usize> {
        self.counts
    }
}

impl fmt::Display for MeasurementCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement Counts ({} shots):", self.total_shots)?;

        let sorted = self.sorted();
        for (bitstring, count) in sorted.iter().take(10) {
            let prob = *count as f64 / self.total_shots as f64;
            writeln!(f, "  {}: {} ({:.2}%)", bitstring, count, prob * 100.0)?;
        }

        if sorted.len() > 10 {
            writeln!(f, "  ... and {} more outcomes", sorted.len() - 10)?;
        }

        Ok(())
    }
}
