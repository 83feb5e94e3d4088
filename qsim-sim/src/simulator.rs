//! Core simulator implementation

use qsim_core::Circuit;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::Instant;
use tracing::debug;

use crate::{
    cancel::CancellationToken,
    config::{SimulatorConfig, OPERATOR_WORKSPACE},
    error::{Result, SimulatorError},
    program::{ExecutionPath, Program},
    register,
    request::{SimulationRequest, SimulationResponse},
    result::{MeasurementCounts, SimulationOutcome, SimulationResult},
    sampling,
    statistics::ExecutionStatistics,
    trajectory::run_trajectory,
};

/// Register strings and the number of shots that measured nothing
#[derive(Debug, Default)]
struct Tally {
    counts: HashMap<String, usize>,
    dropped: usize,
}

impl Tally {
    fn record(mut self, register: Option<String>) -> Self {
        match register {
            Some(bits) => *self.counts.entry(bits).or_insert(0) += 1,
            None => self.dropped += 1,
        }
        self
    }

    fn merge(self, other: Tally) -> Self {
        Self {
            counts: sampling::merge_counts(self.counts, other.counts),
            dropped: self.dropped + other.dropped,
        }
    }
}

/// Dense-operator quantum circuit simulator
///
/// Circuits are compiled once per run; the compiled program is then either
/// evolved once (statevector and deferred sampling) or once per shot with
/// measurement collapse (trajectories). See [`Program::execution_path`].
///
/// # Example
///
/// ```
/// use qsim_core::Circuit;
/// use qsim_sim::{Simulator, SimulatorConfig};
///
/// let simulator = Simulator::new(SimulatorConfig::default().with_seed(1)).unwrap();
///
/// let mut circuit = Circuit::new(2);
/// circuit.h(0).cx(0, 1);
///
/// let result = simulator.run(&circuit).unwrap();
/// let counts = result.counts().unwrap();
/// assert_eq!(counts.get("00") + counts.get("11"), 1024);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Create a new simulator with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn new(config: SimulatorConfig) -> Result<Self> {
        config.validate().map_err(SimulatorError::InvalidConfig)?;

        Ok(Self { config })
    }

    /// Get the simulator configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Run a circuit with the configured number of shots
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The register is wider than `max_qubits` or than `memory_limit` can hold
    /// - An operation cannot be applied (bad qubit index, duplicate qubits)
    /// - A measurement draws an impossible outcome
    pub fn run(&self, circuit: &Circuit) -> Result<SimulationResult> {
        self.run_with_cancellation(circuit, &CancellationToken::new())
    }

    /// Run a circuit, stopping early once `token` is cancelled
    pub fn run_with_cancellation(
        &self,
        circuit: &Circuit,
        token: &CancellationToken,
    ) -> Result<SimulationResult> {
        self.execute(circuit, self.config.shots, token)
    }

    /// Build, run and serialize a request end to end
    ///
    /// The request's `shots` overrides the configured count.
    pub fn execute_request(&self, request: &SimulationRequest) -> Result<SimulationResponse> {
        if request.shots == 0 {
            return Err(SimulatorError::InvalidConfig("shots must be > 0".to_string()));
        }
        self.check_qubits(request.num_qubits)?;

        let circuit = request.to_circuit()?;
        let result = self.execute(&circuit, request.shots, &CancellationToken::new())?;
        Ok(result.into())
    }

    /// Reject registers wider than `max_qubits` or the memory budget allows
    fn check_qubits(&self, num_qubits: usize) -> Result<()> {
        let limit = self.config.qubit_limit();
        if num_qubits > limit {
            return Err(SimulatorError::TooManyQubits {
                num_qubits,
                max_qubits: limit,
            });
        }
        Ok(())
    }

    fn master_rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn execute(
        &self,
        circuit: &Circuit,
        shots: usize,
        token: &CancellationToken,
    ) -> Result<SimulationResult> {
        let total_start = Instant::now();

        // Before anything of size 2^n is allocated
        let num_qubits = circuit.num_qubits();
        self.check_qubits(num_qubits)?;
        token.check()?;

        let mut stats = if self.config.collect_statistics {
            Some(ExecutionStatistics::new())
        } else {
            None
        };

        // 1. Compile circuit
        let compile_start = Instant::now();
        let program = Program::compile(
            circuit,
            self.config.auto_measure,
            self.config.operator_cache_budget(num_qubits),
        )?;
        let path = program.execution_path(self.config.deferred_sampling);

        if let Some(ref mut s) = stats {
            s.compilation_time = compile_start.elapsed();
            s.path = Some(path);
            s.gates_compiled = program.gate_count();
            s.unsupported_skipped = program.skipped_count();
            s.operators_cached = program.cached_operator_count();
            s.peak_memory_bytes = ExecutionStatistics::estimate_memory(
                num_qubits,
                s.operators_cached + OPERATOR_WORKSPACE,
            );
        }

        debug!(
            num_qubits,
            shots,
            steps = program.steps().len(),
            cached = program.cached_operator_count(),
            %path,
            "dispatching simulation"
        );

        // 2. Execute along the chosen path
        let mut master = self.master_rng();
        let outcome = match path {
            ExecutionPath::StateVector => {
                let evolve_start = Instant::now();
                let run = run_trajectory(&program, &mut master, token, false)?;

                if let Some(ref mut s) = stats {
                    s.evolution_time = evolve_start.elapsed();
                    s.trajectories = 1;
                }
                SimulationOutcome::StateVector(run.state)
            },
            ExecutionPath::Trajectories => {
                let seeds: Vec<u64> = (0..shots).map(|_| master.gen()).collect();
                let evolve_start = Instant::now();
                let tally = self.run_shots(&program, &seeds, token)?;

                if let Some(ref mut s) = stats {
                    s.evolution_time = evolve_start.elapsed();
                    s.trajectories = shots;
                    s.shots_dropped = tally.dropped;
                }
                if tally.dropped > 0 {
                    debug!(dropped = tally.dropped, "shots without measured bits dropped");
                }
                SimulationOutcome::Counts(MeasurementCounts::from_counts(tally.counts))
            },
            ExecutionPath::DeferredSampling => {
                let evolve_start = Instant::now();
                let run = run_trajectory(&program, &mut master, token, false)?;
                let evolution_time = evolve_start.elapsed();

                let sample_start = Instant::now();
                let probabilities = sampling::outcome_distribution(&run.state)?;
                let chunks = sampling::chunks(shots, || master.gen());
                let counts = sampling::sample_counts(
                    &probabilities,
                    program.bindings(),
                    &chunks,
                    self.config.use_parallel(shots),
                    token,
                )?;

                if let Some(ref mut s) = stats {
                    s.evolution_time = evolution_time;
                    s.sampling_time = sample_start.elapsed();
                    s.trajectories = 1;
                }
                SimulationOutcome::Counts(MeasurementCounts::from_counts(counts))
            },
        };

        // 3. Build result
        let mut result = SimulationResult {
            outcome,
            shots,
            num_qubits,
            path,
            statistics: None,
        };

        if let Some(mut s) = stats {
            s.shots_recorded = result.recorded_shots().unwrap_or(0);
            s.total_time = total_start.elapsed();
            result = result.with_statistics(s);
        }

        Ok(result)
    }

    /// One collapsing trajectory per seed, tallied into register strings
    fn run_shots(
        &self,
        program: &Program,
        seeds: &[u64],
        token: &CancellationToken,
    ) -> Result<Tally> {
        let shot = |tally: Tally, seed: u64| -> Result<Tally> {
            token.check()?;
            let mut rng = StdRng::seed_from_u64(seed);
            let run = run_trajectory(program, &mut rng, token, true)?;
            Ok(tally.record(register::assemble(program.bindings(), &run.bits)))
        };

        if self.config.use_parallel(seeds.len()) {
            seeds
                .par_iter()
                .try_fold(Tally::default, |tally, &seed| shot(tally, seed))
                .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))
        } else {
            seeds
                .iter()
                .try_fold(Tally::default(), |tally, &seed| shot(tally, seed))
        }
    }
}
