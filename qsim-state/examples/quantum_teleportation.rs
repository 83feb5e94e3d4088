//! Noisy quantum teleportation on density matrices
//!
//! Alice holds a qubit in state |ψ⟩ and shares a Bell pair (|00⟩ + |11⟩)/√2
//! with Bob. Both halves of the pair decay through an amplitude-damping
//! channel of strength γ before Alice measures in the Bell basis. Bob applies
//! the correction for each outcome and we compare his state with |ψ⟩.

use num_complex::Complex64;
use qsim_core::Ket;
use qsim_state::teleport;

/// cos(θ/2)|0⟩ + e^{iφ} sin(θ/2)|1⟩
fn bloch_state(theta: f64, phi: f64) -> Ket {
    Ket::new(vec![
        Complex64::new((theta / 2.0).cos(), 0.0),
        Complex64::from_polar((theta / 2.0).sin(), phi),
    ])
}

fn main() {
    println!("=== Quantum Teleportation Protocol ===\n");

    let payloads = [
        ("|0⟩", bloch_state(0.0, 0.0)),
        ("|1⟩", bloch_state(std::f64::consts::PI, 0.0)),
        ("|+⟩", bloch_state(std::f64::consts::FRAC_PI_2, 0.0)),
        ("θ = π/3, φ = π/4", bloch_state(std::f64::consts::PI / 3.0, std::f64::consts::FRAC_PI_4)),
    ];

    for (label, payload) in &payloads {
        println!("Teleporting {}", label);
        println!("----------------------------------");
        for gamma in [0.0, 0.1, 0.3, 0.6] {
            match teleport(payload, gamma) {
                Ok(report) => {
                    println!("  γ = {:.1}: average fidelity {:.6}", gamma, report.average_fidelity);
                    for outcome in &report.outcomes {
                        println!(
                            "    outcome {}  p = {:.4}  F = {:.6}",
                            outcome.bits, outcome.probability, outcome.fidelity
                        );
                    }
                },
                Err(e) => println!("  γ = {:.1}: failed: {}", gamma, e),
            }
        }
        println!();
    }
}
