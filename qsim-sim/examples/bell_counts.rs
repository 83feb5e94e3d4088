//! Sampling a Bell pair three ways
//!
//! Runs the same circuit through the deferred sampling and trajectory paths,
//! then submits it as a JSON request.

use qsim_core::Circuit;
use qsim_sim::{SimulationRequest, Simulator, SimulatorConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut circuit = Circuit::new(2);
    circuit.h(0).cx(0, 1).measure(0, 0).measure(1, 1);

    let deferred = Simulator::new(SimulatorConfig::debug())?;
    let result = deferred.run(&circuit)?;
    println!("Deferred sampling");
    if let Some(counts) = result.counts() {
        println!("{}", counts);
    }
    if let Some(stats) = &result.statistics {
        println!("{}", stats);
    }

    let trajectories = Simulator::new(SimulatorConfig::trajectories().with_seed(42))?;
    let result = trajectories.run(&circuit)?;
    println!("Trajectories ({})", result.path);
    if let Some((bits, count)) = result.counts().and_then(|c| c.most_common()) {
        println!("Most common: {} ({} shots)", bits, count);
    }

    let request: SimulationRequest = serde_json::from_str(
        r#"{
            "num_qubits": 2,
            "shots": 512,
            "operations": [
                {"type": "h", "qubit": 0},
                {"type": "cx", "control": 0, "target": 1}
            ]
        }"#,
    )?;
    let response = Simulator::new(SimulatorConfig::default().with_seed(7))?.execute_request(&request)?;
    println!("Response: {}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
